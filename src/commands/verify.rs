use anyhow::Result;

use crate::errors::IdError;
use crate::ids::catalog::{Catalog, CatalogSources};
use crate::ids::{builtin_fragments, fragment_file::load_fragment_file, IdFragment};
use crate::io::output::{ErrorEntry, FragmentSummary, OutputFormat, VerifyReport};

use super::CommandContext;

pub fn verify_ids(ctx: &CommandContext, format: Option<OutputFormat>) -> Result<()> {
    let report = verify_sources(&ctx.sources);
    ctx.writer(format).write_verify_report(&report)?;

    if !report.is_ok() {
        anyhow::bail!("Verification failed");
    }
    Ok(())
}

/// Load each source on its own so one bad fragment does not hide the
/// results of the others.
pub fn verify_sources(sources: &CatalogSources) -> VerifyReport {
    let mut catalog = Catalog::new();
    let mut fragments = Vec::new();
    let mut errors = Vec::new();

    let mut candidates: Vec<Result<IdFragment, IdError>> = Vec::new();
    if sources.include_builtin {
        match builtin_fragments() {
            Ok(builtin) => candidates.extend(builtin.into_iter().map(Ok)),
            Err(e) => candidates.push(Err(e)),
        }
    }
    candidates.extend(sources.fragment_files.iter().map(|p| load_fragment_file(p)));

    for candidate in candidates {
        let outcome = candidate.and_then(|fragment| {
            let summary = FragmentSummary {
                name: fragment.name().to_string(),
                ids: fragment.ids().len(),
            };
            catalog.add_fragment(fragment).map(|_| summary)
        });
        match outcome {
            Ok(summary) => fragments.push(summary),
            Err(e) => errors.extend(e.into_errors().into_iter().map(error_entry)),
        }
    }

    log::info!(
        "Verified {} fragments, {} errors",
        fragments.len(),
        errors.len()
    );

    VerifyReport {
        fragments,
        registered: catalog.registry().len(),
        errors,
    }
}

fn error_entry(error: IdError) -> ErrorEntry {
    ErrorEntry {
        category: error.category().to_string(),
        message: error.to_string(),
    }
}
