//! Regression tests for the built-in Spring16 V2p2 delayed-photon IDs.
//!
//! The literal tables below are the reviewed cut values. A failure here
//! means a working point changed; the declared hash must change with it.

use std::collections::HashSet;

use phoid::core::{IsoCoefficients, Region, ShowerShapeCut};
use phoid::ids::spring16_v2p2_delayed_photon as delayed;
use phoid::ids::spring16_v2p2_delayed_photon_oot as oot;
use phoid::{builtin_fragments, Catalog, IdRegistry, IdScheme, IsolationFlavor, WorkingPoint};
use pretty_assertions::assert_eq;

/// H/E, sieie, charged (C1, C2), neutral (C1, C2, C3), photon (C1, C2)
type StandardRow = (f64, f64, [f64; 2], [f64; 3], [f64; 2]);

fn standard_row(wp: &WorkingPoint) -> StandardRow {
    let ShowerShapeCut::HadronicOverEm {
        h_over_e,
        full5x5_sigma_ieta_ieta,
    } = *wp.shower_shape()
    else {
        panic!("{} is not a standard working point", wp.id_name());
    };
    let iso = wp.isolation();
    (
        h_over_e,
        full5x5_sigma_ieta_ieta,
        [iso.charged.c1, iso.charged.c2],
        [
            iso.neutral_hadron.c1,
            iso.neutral_hadron.c2,
            iso.neutral_hadron.c3.unwrap(),
        ],
        [iso.photon.c1, iso.photon.c2],
    )
}

#[test]
fn test_standard_barrel_table() {
    let expected: [StandardRow; 3] = [
        (0.0597, 0.022, [1.295, 0.0], [10.910, 0.0148, 0.000017], [3.630, 0.0047]),
        (0.0396, 0.019, [0.441, 0.00], [2.725, 0.0148, 0.000017], [2.571, 0.0047]),
        (0.0269, 0.017, [0.202, 0.00], [0.264, 0.0148, 0.000017], [2.362, 0.0047]),
    ];
    let actual = [delayed::loose(), delayed::medium(), delayed::tight()]
        .map(|(eb, _)| standard_row(&eb));
    assert_eq!(actual, expected);
}

#[test]
fn test_standard_endcap_table() {
    let expected: [StandardRow; 3] = [
        (0.0481, 0.03013, [1.011, 0.00], [5.931, 0.0163, 0.000014], [6.641, 0.0034]),
        (0.0219, 0.03001, [0.442, 0.00], [1.715, 0.0163, 0.000014], [3.863, 0.0034]),
        (0.0213, 0.03000, [0.034, 0.00], [0.586, 0.0163, 0.000014], [2.617, 0.0034]),
    ];
    let actual = [delayed::loose(), delayed::medium(), delayed::tight()]
        .map(|(_, ee)| standard_row(&ee));
    assert_eq!(actual, expected);
}

#[test]
fn test_out_of_time_table() {
    // S_major, sieie, tracker C1, neutral C1, ECAL C1
    let expected = [
        (1.7, 0.022, 6.0, 9.00, 7.0),
        (1.5, 0.019, 4.0, 7.00, 5.0),
        (1.3, 0.017, 2.0, 5.00, 3.0),
    ];

    let points = [oot::loose(), oot::medium(), oot::tight()];
    for ((eb, ee), row) in points.into_iter().zip(expected) {
        assert_eq!(eb, ee);

        assert_eq!(
            *eb.shower_shape(),
            ShowerShapeCut::SMajor {
                s_major: row.0,
                full5x5_sigma_ieta_ieta: row.1
            }
        );
        let iso = eb.isolation();
        assert_eq!(iso.charged, IsoCoefficients::linear(row.2, 0.005996));
        assert_eq!(
            iso.neutral_hadron,
            IsoCoefficients::quadratic(row.3, -0.0008001, 2.934e-05)
        );
        assert_eq!(iso.photon, IsoCoefficients::linear(row.4, 0.007132));
    }
}

#[test]
fn test_declared_hashes_are_reproduced() {
    for fragment in builtin_fragments().unwrap() {
        for declared in fragment.ids() {
            assert_eq!(
                Some(declared.configured.content_hash().as_str()),
                declared.declared_hash.as_deref(),
                "{}",
                declared.id_name()
            );
        }
    }
}

#[test]
fn test_canonical_form_golden_files() {
    let catalog = Catalog::with_builtin().unwrap();
    assert_eq!(
        catalog.get(delayed::LOOSE).unwrap().canonical_form(),
        include_str!("data/canonical/delayedphoton_loose.txt")
    );
    assert_eq!(
        catalog.get(oot::TIGHT).unwrap().canonical_form(),
        include_str!("data/canonical/delayedphotonOOT_tight.txt")
    );
}

#[test]
fn test_identifiers_are_unique_and_shared_by_regions() {
    let mut names = HashSet::new();
    for fragment in builtin_fragments().unwrap() {
        for declared in fragment.ids() {
            let id = &declared.configured;
            assert!(names.insert(id.id_name().to_string()), "duplicate {}", id.id_name());
            assert_eq!(id.working_point(Region::Barrel).id_name(), id.id_name());
            assert_eq!(id.working_point(Region::Endcap).id_name(), id.id_name());
        }
    }
    assert_eq!(names.len(), 6);
}

#[test]
fn test_hashes_differ_between_working_points() {
    let hashes: HashSet<_> = [
        delayed::LOOSE_HASH,
        delayed::MEDIUM_HASH,
        delayed::TIGHT_HASH,
        oot::LOOSE_HASH,
        oot::MEDIUM_HASH,
        oot::TIGHT_HASH,
    ]
    .into_iter()
    .collect();
    assert_eq!(hashes.len(), 6);
}

#[test]
fn test_loading_twice_is_deterministic() {
    let first = builtin_fragments().unwrap();
    let second = builtin_fragments().unwrap();
    assert_eq!(first, second);

    let mut registry = IdRegistry::new();
    for fragment in first.iter().chain(second.iter()) {
        fragment.load_into(&mut registry).unwrap();
    }
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_schemes_and_approval() {
    let catalog = Catalog::with_builtin().unwrap();
    assert_eq!(catalog.get(delayed::MEDIUM).unwrap().scheme(), IdScheme::StandardV5);
    assert_eq!(catalog.get(oot::MEDIUM).unwrap().scheme(), IdScheme::OutOfTimeV1);
    assert!(catalog.ids().all(|(_, d)| d.configured.is_pog_approved()));
}

#[test]
fn test_out_of_time_isolation_inputs() {
    let id = Catalog::with_builtin().unwrap().get(oot::LOOSE).unwrap().clone();
    let inputs = id.isolation_inputs();
    assert_eq!(
        inputs.input(IsolationFlavor::Charged).map.to_string(),
        "photonIDValueMapProducer:phoTrkIsolation"
    );
    assert_eq!(
        inputs.input(IsolationFlavor::Photon).map.to_string(),
        "photonIDValueMapProducer:phoEcalPFClIsolation"
    );
}

#[test]
fn test_working_point_selected_by_eta() {
    let id = Catalog::with_builtin().unwrap().get(delayed::TIGHT).unwrap().clone();
    assert_eq!(id.working_point_for_eta(1.0).shower_shape().primary(), 0.0269);
    assert_eq!(id.working_point_for_eta(1.479).shower_shape().primary(), 0.0213);
    assert_eq!(id.working_point_for_eta(2.2).shower_shape().primary(), 0.0213);
}
