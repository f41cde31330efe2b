use std::collections::BTreeSet;

use anyhow::Result;

use crate::ids::Catalog;
use crate::io::output::{IdSummary, OutputFormat};

use super::CommandContext;

pub fn list_ids(ctx: &CommandContext, format: Option<OutputFormat>) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    ctx.writer(format).write_id_list(&summarize(&catalog))
}

/// One row per registered ID, in load order. An ID declared by several
/// fragments is listed under the first.
pub fn summarize(catalog: &Catalog) -> Vec<IdSummary> {
    let mut seen = BTreeSet::new();
    catalog
        .ids()
        .filter(|(_, declared)| seen.insert(declared.id_name().to_string()))
        .map(|(fragment, declared)| {
            let id = &declared.configured;
            IdSummary {
                id_name: id.id_name().to_string(),
                fragment: fragment.name().to_string(),
                scheme: id.scheme(),
                hash: catalog
                    .registry()
                    .hash_of(id.id_name())
                    .map(str::to_string)
                    .unwrap_or_else(|| id.content_hash()),
                pog_approved: id.is_pog_approved(),
            }
        })
        .collect()
}
