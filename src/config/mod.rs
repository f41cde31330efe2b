//! Project configuration (`.phoid.toml`).
//!
//! ```toml
//! [registry]
//! include_builtin = true
//! fragments = ["ids/my_fragment.toml"]
//!
//! [output]
//! default_format = "terminal"
//! ```

mod core;
mod loader;
pub mod validation;

pub use self::core::{
    default_include_builtin, LoadedConfig, OutputConfig, PhoidConfig, RegistryConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::{validate_config, validate_config_result};
