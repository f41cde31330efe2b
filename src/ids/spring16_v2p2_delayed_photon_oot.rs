//! Spring16 V2p2 cut-based ID for out-of-time (delayed) photons.
//!
//! Uses S_major instead of H/E, and tracker plus ECAL PF cluster isolation
//! instead of charged hadron and photon PF isolation. Barrel and endcap share
//! the same values at every working point.

use crate::builders::configure_cut_based_photon_id_oot_v1;
use crate::core::{IsolationCutInputs, WorkingPoint};
use crate::errors::IdResult;

use super::{DeclaredId, IdFragment};

pub const FRAGMENT_NAME: &str = "Spring16-V2p2-delayedphotonOOT";

pub const LOOSE: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphotonOOT-loose";
pub const MEDIUM: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphotonOOT-medium";
pub const TIGHT: &str = "cutBasedPhotonID-Spring16-V2p2-delayedphotonOOT-tight";

pub const LOOSE_HASH: &str = "ef5ab5eeb7c7e188987cd42774f66540";
pub const MEDIUM_HASH: &str = "7388c7786ce197d91c5c79d55c99bcd9";
pub const TIGHT_HASH: &str = "e65433c4b0864e3027e6eb0bb7679eb5";

// Argument order: idName, S_major, full5x5 sigma_ieta_ieta,
// tracker C1 C2, neutral hadron C1 C2 C3, ECAL cluster C1 C2.

pub fn loose() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::out_of_time(
        LOOSE, 1.7, 0.022, 6.0, 0.005996, 9.00, -0.0008001, 2.934e-05, 7.0, 0.007132,
    );
    let ee = WorkingPoint::out_of_time(
        LOOSE, 1.7, 0.022, 6.0, 0.005996, 9.00, -0.0008001, 2.934e-05, 7.0, 0.007132,
    );
    (eb, ee)
}

pub fn medium() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::out_of_time(
        MEDIUM, 1.5, 0.019, 4.0, 0.005996, 7.00, -0.0008001, 2.934e-05, 5.0, 0.007132,
    );
    let ee = WorkingPoint::out_of_time(
        MEDIUM, 1.5, 0.019, 4.0, 0.005996, 7.00, -0.0008001, 2.934e-05, 5.0, 0.007132,
    );
    (eb, ee)
}

pub fn tight() -> (WorkingPoint, WorkingPoint) {
    let eb = WorkingPoint::out_of_time(
        TIGHT, 1.3, 0.017, 2.0, 0.005996, 5.00, -0.0008001, 2.934e-05, 3.0, 0.007132,
    );
    let ee = WorkingPoint::out_of_time(
        TIGHT, 1.3, 0.017, 2.0, 0.005996, 5.00, -0.0008001, 2.934e-05, 3.0, 0.007132,
    );
    (eb, ee)
}

pub fn isolation_inputs() -> IdResult<IsolationCutInputs> {
    IsolationCutInputs::out_of_time(
        "photonIDValueMapProducer:phoTrkIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_TrkIsolation_90percentBased_OOT.txt",
        "photonIDValueMapProducer:phoNeutralHadronIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_pfNeutralHadrons_90percentBased_OOT.txt",
        "photonIDValueMapProducer:phoEcalPFClIsolation",
        "RecoEgamma/PhotonIdentification/data/Spring16/effAreaPhotons_cone03_EcalPF_90percentBased_OOT.txt",
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
        let configured = configure_cut_based_photon_id_oot_v1(&eb, &ee, &inputs)?;
        fragment.push(DeclaredId::new(configured.with_pog_approval(true), Some(hash)));
    }

    Ok(fragment)
}
