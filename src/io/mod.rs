pub mod output;

use anyhow::Result;
use std::fs;
use std::path::Path;

pub use output::{create_writer, OutputFormat, OutputWriter};

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
