//! Configured IDs: the barrel and endcap working points of one strictness
//! level, expanded into the ordered cut flow the evaluation engine runs.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::isolation::{InputTag, IsolationCutInputs, IsolationFlavor};
use super::working_point::{IsoCoefficients, Region, WorkingPoint};

/// Cut-flow layout a configured ID follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdScheme {
    /// H/E, sigma_ieta_ieta and PF isolation with effective-area correction
    #[serde(rename = "standard")]
    StandardV5,
    /// S_major, sigma_ieta_ieta, tracker/neutral/ECAL isolation for delayed photons
    #[serde(rename = "out-of-time")]
    OutOfTimeV1,
}

impl IdScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            IdScheme::StandardV5 => "standard",
            IdScheme::OutOfTimeV1 => "out-of-time",
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtaRange {
    pub min: f64,
    pub max: f64,
}

/// Parameters shared by both isolation cut plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationCut {
    pub flavor: IsolationFlavor,
    pub barrel: IsoCoefficients,
    pub endcap: IsoCoefficients,
    pub iso_map: InputTag,
    pub barrel_cut_off: f64,
    pub use_relative_iso: bool,
    pub rho: InputTag,
    pub effective_areas: PathBuf,
}

/// One entry of a cut flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cut", rename_all = "snake_case")]
pub enum Cut {
    MinPt {
        min_pt: f64,
    },
    ScEtaMultiRange {
        use_abs_eta: bool,
        allowed_eta_ranges: Vec<EtaRange>,
    },
    SingleTowerHadOverEm {
        barrel: f64,
        endcap: f64,
        barrel_cut_off: f64,
    },
    SMajor {
        barrel: f64,
        endcap: f64,
        barrel_cut_off: f64,
        s_major_map: InputTag,
    },
    Full5x5SigmaIEtaIEta {
        barrel: f64,
        endcap: f64,
        barrel_cut_off: f64,
    },
    AnyPfIsoWithEa(IsolationCut),
    AnyPfIsoWithEaAndQuadScaling(IsolationCut),
}

/// Value of one cut parameter, in the form it is hashed and displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Double(f64),
    Bool(bool),
    Str(String),
    EtaRanges(Vec<EtaRange>),
}

impl fmt::Display for ParamValue {
    /// Doubles use the shortest decimal form that round-trips, never exponent notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Double(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Str(v) => write!(f, "{}", v),
            ParamValue::EtaRanges(ranges) => {
                let parts: Vec<String> = ranges
                    .iter()
                    .map(|r| format!("{}:{}", r.min, r.max))
                    .collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

impl Cut {
    /// Name of the cut plugin.
    pub fn name(&self) -> &'static str {
        match self {
            Cut::MinPt { .. } => "MinPtCut",
            Cut::ScEtaMultiRange { .. } => "PhoSCEtaMultiRangeCut",
            Cut::SingleTowerHadOverEm { .. } => "PhoSingleTowerHadOverEmCut",
            Cut::SMajor { .. } => "PhoSMajCut",
            Cut::Full5x5SigmaIEtaIEta { .. } => "PhoFull5x5SigmaIEtaIEtaCut",
            Cut::AnyPfIsoWithEa(_) => "PhoAnyPFIsoWithEACut",
            Cut::AnyPfIsoWithEaAndQuadScaling(_) => "PhoAnyPFIsoWithEAAndQuadScalingCut",
        }
    }

    /// Parameters in their fixed order.
    pub fn parameters(&self) -> Vec<(&'static str, ParamValue)> {
        use ParamValue::{Bool, Double, EtaRanges, Str};

        match self {
            Cut::MinPt { min_pt } => vec![("minPt", Double(*min_pt))],
            Cut::ScEtaMultiRange {
                use_abs_eta,
                allowed_eta_ranges,
            } => vec![
                ("useAbsEta", Bool(*use_abs_eta)),
                ("allowedEtaRanges", EtaRanges(allowed_eta_ranges.clone())),
            ],
            Cut::SingleTowerHadOverEm {
                barrel,
                endcap,
                barrel_cut_off,
            } => vec![
                ("hadronicOverEMCutValueEB", Double(*barrel)),
                ("hadronicOverEMCutValueEE", Double(*endcap)),
                ("barrelCutOff", Double(*barrel_cut_off)),
            ],
            Cut::SMajor {
                barrel,
                endcap,
                barrel_cut_off,
                s_major_map,
            } => vec![
                ("C1_EB", Double(*barrel)),
                ("C1_EE", Double(*endcap)),
                ("barrelCutOff", Double(*barrel_cut_off)),
                ("sMajMap", Str(s_major_map.to_string())),
            ],
            Cut::Full5x5SigmaIEtaIEta {
                barrel,
                endcap,
                barrel_cut_off,
            } => vec![
                ("cutValueEB", Double(*barrel)),
                ("cutValueEE", Double(*endcap)),
                ("barrelCutOff", Double(*barrel_cut_off)),
            ],
            Cut::AnyPfIsoWithEa(iso) => {
                let mut params = vec![
                    ("C1_EB", Double(iso.barrel.c1)),
                    ("C2_EB", Double(iso.barrel.c2)),
                    ("C1_EE", Double(iso.endcap.c1)),
                    ("C2_EE", Double(iso.endcap.c2)),
                ];
                params.extend(isolation_tail(iso));
                params
            }
            Cut::AnyPfIsoWithEaAndQuadScaling(iso) => {
                let mut params = vec![
                    ("C1_EB", Double(iso.barrel.c1)),
                    ("C2_EB", Double(iso.barrel.c2)),
                    ("C3_EB", Double(iso.barrel.c3.unwrap_or(0.0))),
                    ("C1_EE", Double(iso.endcap.c1)),
                    ("C2_EE", Double(iso.endcap.c2)),
                    ("C3_EE", Double(iso.endcap.c3.unwrap_or(0.0))),
                ];
                params.extend(isolation_tail(iso));
                params
            }
        }
    }

    pub fn isolation(&self) -> Option<&IsolationCut> {
        match self {
            Cut::AnyPfIsoWithEa(iso) | Cut::AnyPfIsoWithEaAndQuadScaling(iso) => Some(iso),
            _ => None,
        }
    }
}

fn isolation_tail(iso: &IsolationCut) -> Vec<(&'static str, ParamValue)> {
    vec![
        ("anyPFIsoMap", ParamValue::Str(iso.iso_map.to_string())),
        ("barrelCutOff", ParamValue::Double(iso.barrel_cut_off)),
        ("useRelativeIso", ParamValue::Bool(iso.use_relative_iso)),
        ("rho", ParamValue::Str(iso.rho.to_string())),
        (
            "effAreasConfigFile",
            ParamValue::Str(iso.effective_areas.display().to_string()),
        ),
    ]
}

/// A complete photon ID: both regions, the isolation inputs and the cut flow
/// built from them.
///
/// Values are produced by the builders in [`crate::builders`] and are
/// immutable afterwards, except for the approval flag which is metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfiguredId {
    id_name: String,
    scheme: IdScheme,
    barrel: WorkingPoint,
    endcap: WorkingPoint,
    isolation_inputs: IsolationCutInputs,
    cut_flow: Vec<Cut>,
    is_pog_approved: bool,
}

impl ConfiguredId {
    pub(crate) fn new(
        scheme: IdScheme,
        barrel: WorkingPoint,
        endcap: WorkingPoint,
        isolation_inputs: IsolationCutInputs,
        cut_flow: Vec<Cut>,
    ) -> Self {
        Self {
            id_name: barrel.id_name().to_string(),
            scheme,
            barrel,
            endcap,
            isolation_inputs,
            cut_flow,
            is_pog_approved: false,
        }
    }

    pub fn id_name(&self) -> &str {
        &self.id_name
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    pub fn working_point(&self, region: Region) -> &WorkingPoint {
        match region {
            Region::Barrel => &self.barrel,
            Region::Endcap => &self.endcap,
        }
    }

    /// Working point applied to a candidate with the given |eta_SC|.
    pub fn working_point_for_eta(&self, abs_eta: f64) -> &WorkingPoint {
        self.working_point(Region::from_abs_eta(abs_eta))
    }

    pub fn isolation_inputs(&self) -> &IsolationCutInputs {
        &self.isolation_inputs
    }

    pub fn cut_flow(&self) -> &[Cut] {
        &self.cut_flow
    }

    pub fn is_pog_approved(&self) -> bool {
        self.is_pog_approved
    }

    pub fn with_pog_approval(mut self, approved: bool) -> Self {
        self.is_pog_approved = approved;
        self
    }

    /// Text the content hash is computed from.
    pub fn canonical_form(&self) -> String {
        crate::registry::hash::canonical_form(self)
    }

    /// Lowercase hex MD5 of [`Self::canonical_form`].
    pub fn content_hash(&self) -> String {
        crate::registry::hash::content_hash(self)
    }
}
