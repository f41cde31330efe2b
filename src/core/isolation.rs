//! Bindings from isolation flavors to upstream isolation sums and
//! effective-area tables.
//!
//! The tables themselves belong to the evaluation framework; this crate only
//! records where they live.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::configured::IdScheme;
use crate::errors::IdError;

/// Reference to an upstream product, written `label:instance[:process]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InputTag {
    label: String,
    instance: String,
    process: String,
}

impl InputTag {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn process(&self) -> &str {
        &self.process
    }
}

impl FromStr for InputTag {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let label = parts.next().unwrap_or_default().trim();
        let instance = parts.next().unwrap_or_default().trim();
        let process = parts.next().unwrap_or_default().trim();

        if label.is_empty() {
            return Err(IdError::validation(
                "input_tag",
                format!("'{}' has an empty module label", s),
            ));
        }
        if s.chars().any(char::is_control) {
            return Err(IdError::validation(
                "input_tag",
                format!("{:?} contains control characters", s),
            ));
        }
        if parts.next().is_some() {
            return Err(IdError::validation(
                "input_tag",
                format!("'{}' has more than three ':'-separated fields", s),
            ));
        }

        Ok(Self {
            label: label.to_string(),
            instance: instance.to_string(),
            process: process.to_string(),
        })
    }
}

impl TryFrom<String> for InputTag {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputTag> for String {
    fn from(tag: InputTag) -> Self {
        tag.to_string()
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, ":{}", self.process)?;
        }
        Ok(())
    }
}

/// The three isolation sums every photon ID cuts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationFlavor {
    /// Charged hadron PF isolation, or tracker isolation for out-of-time photons
    Charged,
    NeutralHadron,
    /// Photon PF isolation, or ECAL PF cluster isolation for out-of-time photons
    Photon,
}

impl IsolationFlavor {
    pub const ALL: [IsolationFlavor; 3] = [Self::Charged, Self::NeutralHadron, Self::Photon];

    /// Field name used in fragment files and validation paths.
    pub fn key(self) -> &'static str {
        match self {
            Self::Charged => "charged",
            Self::NeutralHadron => "neutral_hadron",
            Self::Photon => "photon",
        }
    }

    /// Human-readable name under the given scheme.
    pub fn label(self, scheme: IdScheme) -> &'static str {
        match (self, scheme) {
            (Self::Charged, IdScheme::StandardV5) => "charged hadron PF isolation",
            (Self::Charged, IdScheme::OutOfTimeV1) => "tracker isolation",
            (Self::NeutralHadron, _) => "neutral hadron PF isolation",
            (Self::Photon, IdScheme::StandardV5) => "photon PF isolation",
            (Self::Photon, IdScheme::OutOfTimeV1) => "ECAL PF cluster isolation",
        }
    }

    /// Only the neutral hadron cut scales quadratically with pt.
    pub fn is_quadratic(self) -> bool {
        matches!(self, Self::NeutralHadron)
    }
}

/// Where one isolation sum comes from and how to correct it for pileup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolationInput {
    pub map: InputTag,
    pub effective_areas: PathBuf,
}

impl IsolationInput {
    pub fn new(map: InputTag, effective_areas: impl Into<PathBuf>) -> Self {
        Self {
            map,
            effective_areas: effective_areas.into(),
        }
    }
}

/// Isolation bindings shared by every working point of one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolationCutInputs {
    scheme: IdScheme,
    charged: IsolationInput,
    neutral_hadron: IsolationInput,
    photon: IsolationInput,
}

impl IsolationCutInputs {
    pub fn new(
        scheme: IdScheme,
        charged: IsolationInput,
        neutral_hadron: IsolationInput,
        photon: IsolationInput,
    ) -> Self {
        Self {
            scheme,
            charged,
            neutral_hadron,
            photon,
        }
    }

    /// Standard PF isolation inputs, arguments in declaration order.
    pub fn standard(
        ch_had_map: &str,
        ch_had_eff_areas: impl AsRef<Path>,
        neu_had_map: &str,
        neu_had_eff_areas: impl AsRef<Path>,
        pho_map: &str,
        pho_eff_areas: impl AsRef<Path>,
    ) -> Result<Self, IdError> {
        Self::from_parts(
            IdScheme::StandardV5,
            [
                (ch_had_map, ch_had_eff_areas.as_ref()),
                (neu_had_map, neu_had_eff_areas.as_ref()),
                (pho_map, pho_eff_areas.as_ref()),
            ],
        )
    }

    /// Out-of-time inputs: tracker, neutral hadron and ECAL cluster isolation.
    pub fn out_of_time(
        trk_map: &str,
        trk_eff_areas: impl AsRef<Path>,
        neu_had_map: &str,
        neu_had_eff_areas: impl AsRef<Path>,
        ecal_map: &str,
        ecal_eff_areas: impl AsRef<Path>,
    ) -> Result<Self, IdError> {
        Self::from_parts(
            IdScheme::OutOfTimeV1,
            [
                (trk_map, trk_eff_areas.as_ref()),
                (neu_had_map, neu_had_eff_areas.as_ref()),
                (ecal_map, ecal_eff_areas.as_ref()),
            ],
        )
    }

    fn from_parts(scheme: IdScheme, parts: [(&str, &Path); 3]) -> Result<Self, IdError> {
        let [charged, neutral_hadron, photon] = parts;
        let input = |(map, eff_areas): (&str, &Path)| -> Result<IsolationInput, IdError> {
            Ok(IsolationInput::new(map.parse()?, eff_areas))
        };
        Ok(Self::new(
            scheme,
            input(charged)?,
            input(neutral_hadron)?,
            input(photon)?,
        ))
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    pub fn input(&self, flavor: IsolationFlavor) -> &IsolationInput {
        match flavor {
            IsolationFlavor::Charged => &self.charged,
            IsolationFlavor::NeutralHadron => &self.neutral_hadron,
            IsolationFlavor::Photon => &self.photon,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IsolationFlavor, &IsolationInput)> {
        IsolationFlavor::ALL.into_iter().map(|f| (f, self.input(f)))
    }
}
