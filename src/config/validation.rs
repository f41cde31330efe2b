//! Validation with error accumulation for `.phoid.toml`.
//!
//! Every problem in the file is reported in one run, each with the dotted
//! path of the offending key.

use std::collections::BTreeSet;

use crate::effects::{
    combine_validations, into_result, validation_failure, validation_from_errors,
    validation_success, IdValidation,
};
use crate::errors::{IdError, IdResult};
use crate::io::output::OutputFormat;

use super::core::{OutputConfig, RegistryConfig};
use super::PhoidConfig;

/// Validate the entire config, accumulating all errors.
///
/// ```rust
/// use phoid::config::{validate_config, PhoidConfig};
///
/// assert!(validate_config(&PhoidConfig::default()).is_success());
/// ```
pub fn validate_config(config: &PhoidConfig) -> IdValidation<()> {
    let validations = vec![
        validate_registry(config.registry.as_ref()),
        validate_output(config.output.as_ref()),
    ];
    combine_validations(validations).map(|_| ())
}

/// Backwards-compatible `Result` wrapper.
pub fn validate_config_result(config: &PhoidConfig) -> IdResult<()> {
    into_result(validate_config(config))
}

fn validate_registry(registry: Option<&RegistryConfig>) -> IdValidation<()> {
    let Some(registry) = registry else {
        return validation_success(());
    };

    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();

    for (i, path) in registry.fragments.iter().enumerate() {
        let field = format!("registry.fragments[{i}]");
        if path.as_os_str().is_empty() {
            errors.push(IdError::validation(field, "path is empty"));
        } else if !seen.insert(path) {
            errors.push(IdError::validation(
                field,
                format!("'{}' is listed more than once", path.display()),
            ));
        }
    }

    validation_from_errors(errors)
}

fn validate_output(output: Option<&OutputConfig>) -> IdValidation<()> {
    match output.and_then(|o| o.default_format.as_deref()) {
        Some(format) if OutputFormat::parse(format).is_none() => {
            validation_failure(IdError::validation(
                "output.default_format",
                format!("unknown format '{format}' (expected 'terminal' or 'json')"),
            ))
        }
        _ => validation_success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with(fragments: &[&str], format: Option<&str>) -> PhoidConfig {
        PhoidConfig {
            registry: Some(RegistryConfig {
                include_builtin: true,
                fragments: fragments.iter().map(PathBuf::from).collect(),
            }),
            output: Some(OutputConfig {
                default_format: format.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(&["a.toml", "b.toml"], Some("json"));
        assert!(validate_config_result(&config).is_ok());
    }

    #[test]
    fn test_accumulates_all_errors() {
        let config = config_with(&["a.toml", "", "a.toml"], Some("yaml"));
        let errors = validate_config_result(&config).unwrap_err().into_errors();

        let fields: Vec<_> = errors
            .iter()
            .map(|e| match e {
                IdError::Validation { field, .. } => field.as_str(),
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                "registry.fragments[1]",
                "registry.fragments[2]",
                "output.default_format"
            ]
        );
    }
}
