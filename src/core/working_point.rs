//! Per-region working point records.
//!
//! A working point is the set of numeric thresholds one strictness level
//! (loose, medium, tight) applies in one detector region. Barrel and endcap
//! each get their own record; both carry the identifier of the ID they belong to.
//!
//! Isolation cuts are `absIso < C1 + pt*C2`, except for the neutral hadron
//! flavor which adds a quadratic term: `absIso < C1 + pt*C2 + pt*pt*C3`.

use serde::{Deserialize, Serialize};

use super::configured::IdScheme;
use super::isolation::IsolationFlavor;

/// |eta| of the supercluster below which a candidate is in the barrel.
pub const BARREL_CUT_OFF: f64 = 1.479;

/// Detector region a working point applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Barrel,
    Endcap,
}

impl Region {
    /// Region of a candidate given the absolute supercluster eta.
    pub fn from_abs_eta(abs_eta: f64) -> Self {
        if abs_eta < BARREL_CUT_OFF {
            Region::Barrel
        } else {
            Region::Endcap
        }
    }

    /// Short suffix used in cut parameter names.
    pub fn suffix(self) -> &'static str {
        match self {
            Region::Barrel => "EB",
            Region::Endcap => "EE",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Barrel => "barrel",
            Region::Endcap => "endcap",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coefficients of a pt-dependent isolation cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsoCoefficients {
    pub c1: f64,
    pub c2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c3: Option<f64>,
}

impl IsoCoefficients {
    /// `C1 + pt*C2`
    pub const fn linear(c1: f64, c2: f64) -> Self {
        Self { c1, c2, c3: None }
    }

    /// `C1 + pt*C2 + pt*pt*C3`
    pub const fn quadratic(c1: f64, c2: f64, c3: f64) -> Self {
        Self {
            c1,
            c2,
            c3: Some(c3),
        }
    }

    pub fn is_quadratic(&self) -> bool {
        self.c3.is_some()
    }

    /// Upper bound on the pileup-corrected isolation sum at the given pt.
    pub fn threshold(&self, pt: f64) -> f64 {
        self.c1 + pt * self.c2 + pt * pt * self.c3.unwrap_or(0.0)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = f64> {
        [Some(self.c1), Some(self.c2), self.c3].into_iter().flatten()
    }
}

/// Shower-shape requirements. The variant fixes which ID scheme a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShowerShapeCut {
    /// Single-tower H/E plus full 5x5 sigma_ieta_ieta
    HadronicOverEm {
        h_over_e: f64,
        full5x5_sigma_ieta_ieta: f64,
    },
    /// Major axis of the cluster shape plus full 5x5 sigma_ieta_ieta (out-of-time photons)
    SMajor {
        s_major: f64,
        full5x5_sigma_ieta_ieta: f64,
    },
}

impl ShowerShapeCut {
    pub fn full5x5_sigma_ieta_ieta(&self) -> f64 {
        match *self {
            Self::HadronicOverEm {
                full5x5_sigma_ieta_ieta,
                ..
            }
            | Self::SMajor {
                full5x5_sigma_ieta_ieta,
                ..
            } => full5x5_sigma_ieta_ieta,
        }
    }

    /// The scheme-specific threshold (H/E or S_major).
    pub fn primary(&self) -> f64 {
        match *self {
            Self::HadronicOverEm { h_over_e, .. } => h_over_e,
            Self::SMajor { s_major, .. } => s_major,
        }
    }

    pub fn primary_name(&self) -> &'static str {
        match self {
            Self::HadronicOverEm { .. } => "h_over_e",
            Self::SMajor { .. } => "s_major",
        }
    }

    pub fn scheme(&self) -> IdScheme {
        match self {
            Self::HadronicOverEm { .. } => IdScheme::StandardV5,
            Self::SMajor { .. } => IdScheme::OutOfTimeV1,
        }
    }
}

/// One coefficient set per isolation flavor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsolationCuts {
    pub charged: IsoCoefficients,
    pub neutral_hadron: IsoCoefficients,
    pub photon: IsoCoefficients,
}

impl IsolationCuts {
    pub fn get(&self, flavor: IsolationFlavor) -> IsoCoefficients {
        match flavor {
            IsolationFlavor::Charged => self.charged,
            IsolationFlavor::NeutralHadron => self.neutral_hadron,
            IsolationFlavor::Photon => self.photon,
        }
    }
}

/// Thresholds for one strictness level in one detector region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingPoint {
    id_name: String,
    shower_shape: ShowerShapeCut,
    isolation: IsolationCuts,
}

impl WorkingPoint {
    pub fn new(
        id_name: impl Into<String>,
        shower_shape: ShowerShapeCut,
        isolation: IsolationCuts,
    ) -> Self {
        Self {
            id_name: id_name.into(),
            shower_shape,
            isolation,
        }
    }

    /// Standard particle-flow working point, arguments in declaration order.
    #[allow(clippy::too_many_arguments)]
    pub fn standard(
        id_name: impl Into<String>,
        h_over_e: f64,
        full5x5_sigma_ieta_ieta: f64,
        ch_had_c1: f64,
        ch_had_c2: f64,
        neu_had_c1: f64,
        neu_had_c2: f64,
        neu_had_c3: f64,
        pho_c1: f64,
        pho_c2: f64,
    ) -> Self {
        Self::new(
            id_name,
            ShowerShapeCut::HadronicOverEm {
                h_over_e,
                full5x5_sigma_ieta_ieta,
            },
            IsolationCuts {
                charged: IsoCoefficients::linear(ch_had_c1, ch_had_c2),
                neutral_hadron: IsoCoefficients::quadratic(neu_had_c1, neu_had_c2, neu_had_c3),
                photon: IsoCoefficients::linear(pho_c1, pho_c2),
            },
        )
    }

    /// Out-of-time working point: S_major replaces H/E, tracker and ECAL cluster
    /// isolation replace the charged hadron and photon PF isolation.
    #[allow(clippy::too_many_arguments)]
    pub fn out_of_time(
        id_name: impl Into<String>,
        s_major: f64,
        full5x5_sigma_ieta_ieta: f64,
        trk_c1: f64,
        trk_c2: f64,
        neu_had_c1: f64,
        neu_had_c2: f64,
        neu_had_c3: f64,
        ecal_c1: f64,
        ecal_c2: f64,
    ) -> Self {
        Self::new(
            id_name,
            ShowerShapeCut::SMajor {
                s_major,
                full5x5_sigma_ieta_ieta,
            },
            IsolationCuts {
                charged: IsoCoefficients::linear(trk_c1, trk_c2),
                neutral_hadron: IsoCoefficients::quadratic(neu_had_c1, neu_had_c2, neu_had_c3),
                photon: IsoCoefficients::linear(ecal_c1, ecal_c2),
            },
        )
    }

    pub fn id_name(&self) -> &str {
        &self.id_name
    }

    pub fn shower_shape(&self) -> &ShowerShapeCut {
        &self.shower_shape
    }

    pub fn isolation(&self) -> &IsolationCuts {
        &self.isolation
    }

    pub fn scheme(&self) -> IdScheme {
        self.shower_shape.scheme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loose_eb() -> WorkingPoint {
        WorkingPoint::standard(
            "test-loose",
            0.0597,
            0.022,
            1.295,
            0.0,
            10.910,
            0.0148,
            0.000017,
            3.630,
            0.0047,
        )
    }

    #[test]
    fn test_region_boundary() {
        assert_eq!(Region::from_abs_eta(0.0), Region::Barrel);
        assert_eq!(Region::from_abs_eta(1.4789), Region::Barrel);
        assert_eq!(Region::from_abs_eta(BARREL_CUT_OFF), Region::Endcap);
        assert_eq!(Region::from_abs_eta(2.4), Region::Endcap);
    }

    #[test]
    fn test_linear_threshold_ignores_missing_c3() {
        let iso = IsoCoefficients::linear(3.630, 0.0047);
        assert!((iso.threshold(100.0) - 4.1).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic_threshold() {
        let iso = IsoCoefficients::quadratic(1.0, 0.5, 0.25);
        assert_eq!(iso.threshold(2.0), 1.0 + 1.0 + 1.0);
        assert!(iso.is_quadratic());
    }

    #[test]
    fn test_standard_constructor_field_order() {
        let wp = loose_eb();
        assert_eq!(wp.id_name(), "test-loose");
        assert_eq!(wp.shower_shape().primary(), 0.0597);
        assert_eq!(wp.shower_shape().full5x5_sigma_ieta_ieta(), 0.022);
        assert_eq!(wp.isolation().charged, IsoCoefficients::linear(1.295, 0.0));
        assert_eq!(
            wp.isolation().neutral_hadron,
            IsoCoefficients::quadratic(10.910, 0.0148, 0.000017)
        );
        assert_eq!(wp.isolation().photon, IsoCoefficients::linear(3.630, 0.0047));
        assert_eq!(wp.scheme(), IdScheme::StandardV5);
    }

    #[test]
    fn test_out_of_time_scheme() {
        let wp = WorkingPoint::out_of_time(
            "oot", 1.7, 0.022, 6.0, 0.005996, 9.0, -0.0008001, 2.934e-05, 7.0, 0.007132,
        );
        assert_eq!(wp.scheme(), IdScheme::OutOfTimeV1);
        assert_eq!(wp.shower_shape().primary_name(), "s_major");
    }

    #[test]
    fn test_coefficient_values_skip_missing_c3() {
        let linear: Vec<f64> = IsoCoefficients::linear(1.0, 2.0).values().collect();
        assert_eq!(linear, vec![1.0, 2.0]);
    }
}
