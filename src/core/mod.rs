//! Data model for cut-based photon identification.

pub mod configured;
pub mod isolation;
pub mod working_point;

pub use configured::{ConfiguredId, Cut, EtaRange, IdScheme, IsolationCut, ParamValue};
pub use isolation::{InputTag, IsolationCutInputs, IsolationFlavor, IsolationInput};
pub use working_point::{
    IsoCoefficients, IsolationCuts, Region, ShowerShapeCut, WorkingPoint, BARREL_CUT_OFF,
};
