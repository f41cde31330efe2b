//! Builders producing configured IDs from working point declarations.

pub mod cut_based;
pub mod validation;

pub use cut_based::{
    configure_cut_based_photon_id_oot_v1, configure_cut_based_photon_id_v5, configure_for_scheme,
    regions,
};
