//! Spring16 V2p2 cut-based photon ID for delayed-photon analyses (80X samples).
//!
//! Cut values follow the Run 2 cut-based photon identification working points,
//! see <https://twiki.cern.ch/twiki/bin/viewauth/CMS/CutBasedPhotonIdentificationRun2>.
//!
//! If any value below changes, the hashes must be recomputed with
//! `phoid hash` and reviewed; the registry refuses stale ones.

use crate::builders::configure_cut_based_photon_id_v5;
use crate::core::{IsolationCutInputs, WorkingPoint};
use crate::errors::IdResult;

use super::{DeclaredId, IdFragment};

pub const FRAGMENT_NAME: &str = "Spring16-V2p2-delayedphoton";

pub const LOOSE: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphoton-loose";
pub const MEDIUM: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphoton-medium";
pub const TIGHT: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphoton-tight";

pub const LOOSE_HASH: &str = "36b766073d7d0d1e8832307dd9c51154";
pub const MEDIUM_HASH: &str = "6c9499567778c3b39315a210667cd651";
pub const TIGHT_HASH: &str = "b297c9315fd995e0d25512625ace65e6";

// Argument order: idName, H/E, full5x5 sigma_ieta_ieta,
// charged hadron C1 C2, neutral hadron C1 C2 C3, photon C1 C2.

pub fn loose() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::standard(
        LOOSE, 0.0597, 0.022, 1.295, 0.0, 10.910, 0.0148, 0.000017, 3.630, 0.0047,
    );
    let ee = WorkingPoint::standard(
        LOOSE, 0.0481, 0.03013, 1.011, 0.00, 5.931, 0.0163, 0.000014, 6.641, 0.0034,
    );
    (eb, ee)
}

pub fn medium() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::standard(
        MEDIUM, 0.0396, 0.019, 0.441, 0.00, 2.725, 0.0148, 0.000017, 2.571, 0.0047,
    );
    let ee = WorkingPoint::standard(
        MEDIUM, 0.0219, 0.03001, 0.442, 0.00, 1.715, 0.0163, 0.000014, 3.863, 0.0034,
    );
    (eb, ee)
}

pub fn tight() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::standard(
        TIGHT, 0.0269, 0.017, 0.202, 0.00, 0.264, 0.0148, 0.000017, 2.362, 0.0047,
    );
    let ee = WorkingPoint::standard(
        TIGHT, 0.0213, 0.03000, 0.034, 0.00, 0.586, 0.0163, 0.000014, 2.617, 0.0034,
    );
    (eb, ee)
}

/// Precomputed isolation sums and their effective-area tables.
pub fn isolation_inputs() -> IdResult<IsolationCutInputs> {
    IsolationCutInputs::standard(
        "photonIDValueMapProducer:phoChargedIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_pfChargedHadrons_90percentBased.txt",
        "photonIDValueMapProducer:phoNeutralHadronIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_pfNeutralHadrons_90percentBased.txt",
        "photonIDValueMapProducer:phoPhotonIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_pfPhotons_90percentBased.txt",
    )
}

pub fn fragment() -> IdResult<IdFragment> {
    let inputs = isolation_inputs()?;
    let mut fragment = IdFragment::new(FRAGMENT_NAME);

    for ((eb, ee), hash) in [
        (loose(), LOOSE_HASH),
        (medium(), MEDIUM_HASH),
        (tight(), TIGHT_HASH),
    ] {
        let configured = configure_cut_based_photon_id_v5(&eb, &ee, &inputs)?;
        fragment.push(DeclaredId::new(configured.with_pog_approval(true), Some(hash)));
    }

    Ok(fragment)
}
