//! `phoid hash`: print the content hash of every ID in a fragment file.
//!
//! This is the step a fragment author runs after changing cut values, to get
//! the hashes to declare. The file is not registered, so stale or missing
//! hashes do not stop the command.

use std::path::Path;

use anyhow::Result;

use crate::ids::fragment_file::load_fragment_file;
use crate::ids::IdFragment;
use crate::io::output::{HashEntry, HashReport, HashStatus, OutputFormat};
use crate::registry::hash::normalize;

use super::CommandContext;

pub fn hash_fragment(
    ctx: &CommandContext,
    path: &Path,
    format: Option<OutputFormat>,
) -> Result<()> {
    let fragment = load_fragment_file(path)?;
    ctx.writer(format).write_hash_report(&hash_report(&fragment))
}

pub fn hash_report(fragment: &IdFragment) -> HashReport {
    let entries = fragment
        .ids()
        .iter()
        .map(|declared| {
            let computed = declared.configured.content_hash();
            let status = match declared.declared_hash.as_deref() {
                None => HashStatus::Undeclared,
                Some(h) if normalize(h) == computed => HashStatus::Matches,
                Some(_) => HashStatus::Differs,
            };
            HashEntry {
                id_name: declared.id_name().to_string(),
                computed,
                declared: declared.declared_hash.clone(),
                status,
            }
        })
        .collect();

    HashReport {
        fragment: fragment.name().to_string(),
        entries,
    }
}
