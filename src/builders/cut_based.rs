//! Builders that turn barrel/endcap working points and isolation inputs into
//! a [`ConfiguredId`].
//!
//! Both cut flows share their first two cuts (minimum pt and supercluster eta
//! acceptance) and their last three (isolation). They differ in the shower
//! shape cut: H/E for the standard scheme, S_major for out-of-time photons.

use crate::core::{
    ConfiguredId, Cut, EtaRange, IdScheme, InputTag, IsolationCut, IsolationCutInputs,
    IsolationFlavor, Region, ShowerShapeCut, WorkingPoint, BARREL_CUT_OFF,
};
use crate::effects::into_result;
use crate::errors::IdResult;

use super::validation::validate_declaration;

/// Minimum photon pt in GeV.
pub const MIN_PT: f64 = 5.0;

/// Supercluster |eta| acceptance.
pub const ETA_ACCEPTANCE: EtaRange = EtaRange { min: 0.0, max: 3.0 };

/// Energy density used for the effective-area pileup correction.
pub const RHO_TAG: &str = "fixedGridRhoFastjetAll";

/// Value map holding the S_major shower shape of each photon.
pub const S_MAJOR_MAP: &str = "photonIDValueMapProducer:phoSMajor";

/// Configure a standard cut-based photon ID (H/E + PF isolation).
pub fn configure_cut_based_photon_id_v5(
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
) -> IdResult<ConfiguredId> {
    configure(IdScheme::StandardV5, barrel, endcap, inputs)
}

/// Configure an out-of-time (delayed) photon ID (S_major + tracker/ECAL isolation).
pub fn configure_cut_based_photon_id_oot_v1(
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
) -> IdResult<ConfiguredId> {
    configure(IdScheme::OutOfTimeV1, barrel, endcap, inputs)
}

/// Dispatch on the scheme of the barrel working point.
pub fn configure_for_scheme(
    scheme: IdScheme,
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
) -> IdResult<ConfiguredId> {
    match scheme {
        IdScheme::StandardV5 => configure_cut_based_photon_id_v5(barrel, endcap, inputs),
        IdScheme::OutOfTimeV1 => configure_cut_based_photon_id_oot_v1(barrel, endcap, inputs),
    }
}

fn configure(
    scheme: IdScheme,
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
) -> IdResult<ConfiguredId> {
    into_result(validate_declaration(barrel, endcap, inputs, scheme))?;

    let cut_flow = build_cut_flow(barrel, endcap, inputs)?;
    log::debug!(
        "Configured {} ({} scheme, {} cuts)",
        barrel.id_name(),
        scheme,
        cut_flow.len()
    );

    Ok(ConfiguredId::new(
        scheme,
        barrel.clone(),
        endcap.clone(),
        inputs.clone(),
        cut_flow,
    ))
}

fn build_cut_flow(
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
) -> IdResult<Vec<Cut>> {
    let rho: InputTag = RHO_TAG.parse()?;

    let mut cuts = vec![
        Cut::MinPt { min_pt: MIN_PT },
        Cut::ScEtaMultiRange {
            use_abs_eta: true,
            allowed_eta_ranges: vec![ETA_ACCEPTANCE],
        },
        shower_shape_cut(barrel.shower_shape(), endcap.shower_shape())?,
        Cut::Full5x5SigmaIEtaIEta {
            barrel: barrel.shower_shape().full5x5_sigma_ieta_ieta(),
            endcap: endcap.shower_shape().full5x5_sigma_ieta_ieta(),
            barrel_cut_off: BARREL_CUT_OFF,
        },
    ];

    for flavor in IsolationFlavor::ALL {
        let input = inputs.input(flavor);
        let iso = IsolationCut {
            flavor,
            barrel: barrel.isolation().get(flavor),
            endcap: endcap.isolation().get(flavor),
            iso_map: input.map.clone(),
            barrel_cut_off: BARREL_CUT_OFF,
            use_relative_iso: false,
            rho: rho.clone(),
            effective_areas: input.effective_areas.clone(),
        };
        cuts.push(if flavor.is_quadratic() {
            Cut::AnyPfIsoWithEaAndQuadScaling(iso)
        } else {
            Cut::AnyPfIsoWithEa(iso)
        });
    }

    Ok(cuts)
}

fn shower_shape_cut(barrel: &ShowerShapeCut, endcap: &ShowerShapeCut) -> IdResult<Cut> {
    // Validation guarantees both regions share a scheme.
    Ok(match barrel {
        ShowerShapeCut::HadronicOverEm { h_over_e, .. } => Cut::SingleTowerHadOverEm {
            barrel: *h_over_e,
            endcap: endcap.primary(),
            barrel_cut_off: BARREL_CUT_OFF,
        },
        ShowerShapeCut::SMajor { s_major, .. } => Cut::SMajor {
            barrel: *s_major,
            endcap: endcap.primary(),
            barrel_cut_off: BARREL_CUT_OFF,
            s_major_map: S_MAJOR_MAP.parse()?,
        },
    })
}

/// Region-ordered view used by displays: (region, working point).
pub fn regions(id: &ConfiguredId) -> [(Region, &WorkingPoint); 2] {
    [
        (Region::Barrel, id.working_point(Region::Barrel)),
        (Region::Endcap, id.working_point(Region::Endcap)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IdError;

    fn standard(id: &str) -> WorkingPoint {
        WorkingPoint::standard(
            id, 0.0597, 0.022, 1.295, 0.0, 10.910, 0.0148, 0.000017, 3.630, 0.0047,
        )
    }

    fn oot(id: &str) -> WorkingPoint {
        WorkingPoint::out_of_time(
            id, 1.7, 0.022, 6.0, 0.005996, 9.00, -0.0008001, 2.934e-05, 7.0, 0.007132,
        )
    }

    fn standard_inputs() -> IsolationCutInputs {
        IsolationCutInputs::standard("p:ch", "ch.txt", "p:neu", "neu.txt", "p:pho", "pho.txt")
            .unwrap()
    }

    fn oot_inputs() -> IsolationCutInputs {
        IsolationCutInputs::out_of_time(
            "p:trk", "trk.txt", "p:neu", "neu.txt", "p:ecal", "ecal.txt",
        )
        .unwrap()
    }

    fn cut_names(id: &ConfiguredId) -> Vec<&'static str> {
        id.cut_flow().iter().map(Cut::name).collect()
    }

    #[test]
    fn test_v5_cut_flow_order() {
        let id =
            configure_cut_based_photon_id_v5(&standard("x"), &standard("x"), &standard_inputs())
                .unwrap();
        assert_eq!(
            cut_names(&id),
            vec![
                "MinPtCut",
                "PhoSCEtaMultiRangeCut",
                "PhoSingleTowerHadOverEmCut",
                "PhoFull5x5SigmaIEtaIEtaCut",
                "PhoAnyPFIsoWithEACut",
                "PhoAnyPFIsoWithEAAndQuadScalingCut",
                "PhoAnyPFIsoWithEACut",
            ]
        );
        assert_eq!(id.id_name(), "x");
        assert!(!id.is_pog_approved());
    }

    #[test]
    fn test_oot_cut_flow_uses_s_major() {
        let id = configure_cut_based_photon_id_oot_v1(&oot("y"), &oot("y"), &oot_inputs()).unwrap();
        assert_eq!(cut_names(&id)[2], "PhoSMajCut");
        assert_eq!(id.scheme(), IdScheme::OutOfTimeV1);

        let Cut::SMajor { barrel, endcap, .. } = &id.cut_flow()[2] else {
            panic!("expected S_major cut");
        };
        assert_eq!((*barrel, *endcap), (1.7, 1.7));
    }

    #[test]
    fn test_isolation_cuts_carry_inputs() {
        let id = configure_cut_based_photon_id_oot_v1(&oot("y"), &oot("y"), &oot_inputs()).unwrap();
        let isos: Vec<&IsolationCut> = id.cut_flow().iter().filter_map(Cut::isolation).collect();
        assert_eq!(isos.len(), 3);
        assert_eq!(isos[0].iso_map.to_string(), "p:trk");
        assert_eq!(isos[1].barrel.c3, Some(2.934e-05));
        assert_eq!(isos[2].effective_areas.to_str(), Some("ecal.txt"));
        assert!(isos.iter().all(|i| i.rho.to_string() == RHO_TAG));
    }

    #[test]
    fn test_wrong_builder_is_rejected() {
        let err =
            configure_cut_based_photon_id_v5(&oot("y"), &oot("y"), &oot_inputs()).unwrap_err();
        assert_eq!(err.clone().into_errors().len(), 3);
        assert!(matches!(err, IdError::Multiple { .. }));
    }

    #[test]
    fn test_mismatched_identifiers_are_rejected() {
        let err =
            configure_cut_based_photon_id_v5(&standard("a"), &standard("b"), &standard_inputs())
                .unwrap_err();
        assert!(matches!(err, IdError::Validation { ref field, .. } if field == "endcap.id_name"));
    }

    #[test]
    fn test_configure_for_scheme_dispatches() {
        let id = configure_for_scheme(IdScheme::OutOfTimeV1, &oot("z"), &oot("z"), &oot_inputs())
            .unwrap();
        assert_eq!(id.scheme(), IdScheme::OutOfTimeV1);
    }

    #[test]
    fn test_working_point_for_eta() {
        let barrel = standard("x");
        let endcap = WorkingPoint::standard(
            "x", 0.0481, 0.03013, 1.011, 0.0, 5.931, 0.0163, 0.000014, 6.641, 0.0034,
        );
        let id = configure_cut_based_photon_id_v5(&barrel, &endcap, &standard_inputs()).unwrap();
        assert_eq!(id.working_point_for_eta(0.5), &barrel);
        assert_eq!(id.working_point_for_eta(2.0), &endcap);
        assert_eq!(regions(&id)[1].0, Region::Endcap);
    }
}
