//! Subcommand handlers for the `phoid` binary.

pub mod hash;
pub mod init;
pub mod list;
pub mod show;
pub mod verify;

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::config::{load_config, load_config_file, LoadedConfig};
use crate::formatting::FormattingConfig;
use crate::ids::catalog::{Catalog, CatalogSources};
use crate::io::output::{create_writer, OutputFormat, OutputWriter};

/// Settings every subcommand runs with: project config merged with CLI flags.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: LoadedConfig,
    pub sources: CatalogSources,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    pub fn from_args(global: &GlobalArgs) -> Result<Self> {
        let config = match &global.config {
            Some(path) => load_config_file(path)?,
            None => load_config()?,
        };
        let sources = merge_sources(&config, global);
        let formatting = if global.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };

        if let Some(path) = &config.source {
            log::info!("Using configuration from {}", path.display());
        }

        Ok(Self {
            config,
            sources,
            formatting,
        })
    }

    /// Explicit choice, then `.phoid.toml`, then terminal.
    pub fn output_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested
            .or_else(|| {
                self.config
                    .config
                    .default_format()
                    .and_then(OutputFormat::parse)
            })
            .unwrap_or(OutputFormat::Terminal)
    }

    pub fn writer(&self, requested: Option<OutputFormat>) -> Box<dyn OutputWriter> {
        create_writer(self.output_format(requested), self.formatting)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        Ok(Catalog::load(&self.sources)?)
    }
}

/// `--no-builtin` switches the built-ins off; `--fragment` files come after
/// the configured ones.
pub fn merge_sources(config: &LoadedConfig, global: &GlobalArgs) -> CatalogSources {
    let mut sources = config.catalog_sources();
    if global.no_builtin {
        sources.include_builtin = false;
    }
    sources
        .fragment_files
        .extend(global.fragments.iter().cloned());
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, PhoidConfig, RegistryConfig};
    use std::path::PathBuf;

    fn loaded() -> LoadedConfig {
        LoadedConfig::from_file(
            PhoidConfig {
                registry: Some(RegistryConfig {
                    include_builtin: true,
                    fragments: vec![PathBuf::from("configured.toml")],
                }),
                output: Some(OutputConfig {
                    default_format: Some("json".to_string()),
                }),
            },
            "/project/.phoid.toml",
        )
    }

    #[test]
    fn test_cli_fragments_follow_configured_ones() {
        let global = GlobalArgs {
            fragments: vec![PathBuf::from("extra.toml")],
            no_builtin: true,
            ..GlobalArgs::default()
        };
        let sources = merge_sources(&loaded(), &global);

        assert!(!sources.include_builtin);
        assert_eq!(
            sources.fragment_files,
            vec![
                PathBuf::from("/project/configured.toml"),
                PathBuf::from("extra.toml"),
            ]
        );
    }

    #[test]
    fn test_output_format_precedence() {
        let ctx = CommandContext {
            config: loaded(),
            sources: CatalogSources::default(),
            formatting: FormattingConfig::plain(),
        };
        assert_eq!(ctx.output_format(None), OutputFormat::Json);
        assert_eq!(
            ctx.output_format(Some(OutputFormat::Terminal)),
            OutputFormat::Terminal
        );

        let bare = CommandContext {
            config: LoadedConfig::default(),
            ..ctx
        };
        assert_eq!(bare.output_format(None), OutputFormat::Terminal);
    }
}
