use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::errors::{IdError, IdResult};

use super::core::{LoadedConfig, PhoidConfig};
use super::validation::validate_config_result;

pub const CONFIG_FILE_NAME: &str = ".phoid.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate a config from TOML text.
pub fn parse_and_validate_config(contents: &str) -> IdResult<PhoidConfig> {
    let config = toml::from_str::<PhoidConfig>(contents).map_err(|e| {
        IdError::parse(format!(
            "Failed to parse {CONFIG_FILE_NAME}: {}",
            e.message()
        ))
    })?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Load a config from an explicit path.
pub fn load_config_file(path: &Path) -> IdResult<LoadedConfig> {
    let contents =
        read_config_file(path).map_err(|e| IdError::io_with_path(e.to_string(), path))?;
    config_from_contents(&contents, path)
}

fn config_from_contents(contents: &str, path: &Path) -> IdResult<LoadedConfig> {
    let config = parse_and_validate_config(contents).map_err(|e| attach_path(e, path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(LoadedConfig::from_file(config, path))
}

fn attach_path(error: IdError, path: &Path) -> IdError {
    match error {
        IdError::Parse { message, path: None } => IdError::parse_with_path(message, path),
        other => IdError::config_with_path(other.to_string(), path),
    }
}

/// Try a candidate location. A file that is simply absent yields `None`;
/// any other read failure is an error.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<IdResult<LoadedConfig>> {
    match read_config_file(config_path) {
        Ok(contents) => Some(config_from_contents(&contents, config_path)),
        Err(e) => handle_read_error(config_path, &e).map(Err),
    }
}

/// "File not found" is skipped quietly, everything else stops the search.
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) -> Option<IdError> {
    if error.kind() == std::io::ErrorKind::NotFound {
        return None;
    }
    log::warn!(
        "Failed to read config file {}: {}",
        config_path.display(),
        error
    );
    Some(IdError::io_with_path(error.to_string(), config_path))
}

/// Generate directory ancestors up to a depth limit, starting with `start`.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.phoid.toml`.
///
/// The nearest file wins. An unreadable or invalid file is an error rather
/// than a silent fallback, since it decides which IDs get verified.
pub fn load_config_from(start: PathBuf) -> IdResult<LoadedConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH + 1)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} found after checking {} directories. Using defaults.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH + 1
            );
            Ok(LoadedConfig::default())
        })
}

pub fn load_config() -> IdResult<LoadedConfig> {
    match std::env::current_dir() {
        Ok(current) => load_config_from(current),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(LoadedConfig::default())
        }
    }
}
