//! Cut-based photon identification working points with a content-hash registry.
//!
//! Each photon ID is declared as a pair of barrel/endcap [`WorkingPoint`]s plus
//! the [`IsolationCutInputs`] it reads. A builder expands them into a
//! [`ConfiguredId`] with a fixed cut flow, and an [`IdRegistry`] records each
//! identifier with the MD5 hash of that configuration. Registering an ID whose
//! declared hash no longer matches its cut values is a hard error.
//!
//! ```rust
//! use phoid::ids::Catalog;
//!
//! let catalog = Catalog::with_builtin().unwrap();
//! let id = catalog
//!     .get("cutBasedPhotonID-Spring16-V2p2-delayedphoton-tight")
//!     .unwrap();
//! assert_eq!(id.cut_flow().len(), 7);
//! ```

pub mod builders;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod effects;
pub mod errors;
pub mod formatting;
pub mod ids;
pub mod io;
pub mod registry;

pub use crate::builders::{
    configure_cut_based_photon_id_oot_v1, configure_cut_based_photon_id_v5,
};
pub use crate::core::{
    ConfiguredId, Cut, IdScheme, InputTag, IsoCoefficients, IsolationCutInputs, IsolationFlavor,
    Region, ShowerShapeCut, WorkingPoint, BARREL_CUT_OFF,
};
pub use crate::errors::{IdError, IdResult};
pub use crate::ids::catalog::{Catalog, CatalogSources};
pub use crate::ids::{builtin_fragments, DeclaredId, IdFragment};
pub use crate::registry::{IdRegistry, Registration};
