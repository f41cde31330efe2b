//! Unified error type for photon ID declaration, loading and registration.
//!
//! Errors are grouped into categories that let callers tell apart ordinary
//! input problems (a malformed fragment file, a bad coefficient) from
//! integrity failures (a declared hash that no longer matches the cut values).
//!
//! # Example
//!
//! ```rust
//! use phoid::errors::IdError;
//!
//! let err = IdError::hash_mismatch("some-id", "0".repeat(32), "f".repeat(32));
//! assert!(err.is_integrity_error());
//! assert_eq!(err.category(), "Integrity");
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type IdResult<T> = Result<T, IdError>;

/// Error type for all photon ID operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// File system errors while reading fragments or configuration
    #[error("I/O error: {message}{}", display_path(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    /// Malformed TOML in a fragment or configuration file
    #[error("Parse error: {message}{}", display_path(.path))]
    Parse {
        message: String,
        path: Option<PathBuf>,
    },

    /// Project configuration problems
    #[error("Config error: {message}{}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A single field failed validation
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Recomputed content hash disagrees with the declared one
    #[error("Hash mismatch for '{id_name}': declared {declared}, computed {computed}")]
    HashMismatch {
        id_name: String,
        declared: String,
        computed: String,
    },

    /// An identifier is already registered with a different hash
    #[error("Registry conflict for '{id_name}': registered {registered}, attempted {attempted}")]
    RegistryConflict {
        id_name: String,
        registered: String,
        attempted: String,
    },

    /// Declared hash is not a 32 digit hexadecimal MD5 sum
    #[error("Malformed hash for '{id_name}': '{hash}' is not a 32 digit hex digest")]
    MalformedHash { id_name: String, hash: String },

    /// An identifier was registered without a declared hash
    #[error("No hash declared for '{id_name}' (run `phoid hash` to compute it)")]
    MissingHash { id_name: String },

    /// Lookup of an identifier that is not registered
    #[error("Unknown ID: '{0}'")]
    UnknownId(String),

    /// Several errors collected during one validation pass
    #[error("{} errors occurred:\n{}", .errors.len(), format_error_list(.errors))]
    Multiple { errors: Vec<IdError> },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" (path: {})", p.display()))
        .unwrap_or_default()
}

impl IdError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: None,
        }
    }

    pub fn parse_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Parse {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a validation error for a dotted field path.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn hash_mismatch(
        id_name: impl Into<String>,
        declared: impl Into<String>,
        computed: impl Into<String>,
    ) -> Self {
        Self::HashMismatch {
            id_name: id_name.into(),
            declared: declared.into(),
            computed: computed.into(),
        }
    }

    pub fn registry_conflict(
        id_name: impl Into<String>,
        registered: impl Into<String>,
        attempted: impl Into<String>,
    ) -> Self {
        Self::RegistryConflict {
            id_name: id_name.into(),
            registered: registered.into(),
            attempted: attempted.into(),
        }
    }

    pub fn malformed_hash(id_name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self::MalformedHash {
            id_name: id_name.into(),
            hash: hash.into(),
        }
    }

    pub fn missing_hash(id_name: impl Into<String>) -> Self {
        Self::MissingHash {
            id_name: id_name.into(),
        }
    }

    pub fn unknown_id(id_name: impl Into<String>) -> Self {
        Self::UnknownId(id_name.into())
    }

    /// Collapse a list of errors: one error stays as-is, more become `Multiple`.
    ///
    /// Nested `Multiple` values are flattened.
    pub fn from_many(errors: Vec<IdError>) -> Self {
        let mut flat: Vec<IdError> = errors
            .into_iter()
            .flat_map(|e| match e {
                Self::Multiple { errors } => errors,
                other => vec![other],
            })
            .collect();

        match flat.len() {
            1 => flat.remove(0),
            _ => Self::Multiple { errors: flat },
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::Parse { .. } => "Parse",
            Self::Config { .. } => "Config",
            Self::Validation { .. } => "Validation",
            Self::HashMismatch { .. } | Self::RegistryConflict { .. } => "Integrity",
            Self::MalformedHash { .. } | Self::MissingHash { .. } => "Registry",
            Self::UnknownId(_) => "Lookup",
            Self::Multiple { .. } => "Multiple",
        }
    }

    /// True when the error means cut values changed without a matching hash update.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Self::HashMismatch { .. } | Self::RegistryConflict { .. } => true,
            Self::Multiple { errors } => errors.iter().any(IdError::is_integrity_error),
            _ => false,
        }
    }

    /// Flatten into the individual errors.
    pub fn into_errors(self) -> Vec<IdError> {
        match self {
            Self::Multiple { errors } => errors,
            other => vec![other],
        }
    }
}

impl From<std::io::Error> for IdError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Format a list of errors as a numbered list.
pub fn format_error_list(errors: &[IdError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}
