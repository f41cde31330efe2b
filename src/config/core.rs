use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ids::catalog::CatalogSources;

/// Root configuration structure, read from `.phoid.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PhoidConfig {
    /// Which fragments make up the registry
    #[serde(default)]
    pub registry: Option<RegistryConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Load the fragments compiled into phoid (default: true)
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Extra fragment files, relative to the configuration file
    #[serde(default)]
    pub fragments: Vec<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            fragments: Vec::new(),
        }
    }
}

pub fn default_include_builtin() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// `terminal` or `json`
    pub default_format: Option<String>,
}

impl PhoidConfig {
    pub fn include_builtin(&self) -> bool {
        self.registry
            .as_ref()
            .map(|r| r.include_builtin)
            .unwrap_or_else(default_include_builtin)
    }

    pub fn fragments(&self) -> &[PathBuf] {
        self.registry
            .as_ref()
            .map(|r| r.fragments.as_slice())
            .unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
    }
}

/// A configuration together with the file it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedConfig {
    pub config: PhoidConfig,
    /// `None` when no `.phoid.toml` was found and defaults apply
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn from_file(config: PhoidConfig, source: impl Into<PathBuf>) -> Self {
        Self {
            config,
            source: Some(source.into()),
        }
    }

    /// Directory that relative fragment paths are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }

    /// Fragment paths with relative entries anchored at the config file.
    pub fn resolved_fragments(&self) -> Vec<PathBuf> {
        self.config
            .fragments()
            .iter()
            .map(|p| match self.base_dir() {
                Some(base) if p.is_relative() => base.join(p),
                _ => p.clone(),
            })
            .collect()
    }

    pub fn catalog_sources(&self) -> CatalogSources {
        CatalogSources {
            include_builtin: self.config.include_builtin(),
            fragment_files: self.resolved_fragments(),
        }
    }
}
