//! All fragments known to one run, verified into a single registry.

use std::path::{Path, PathBuf};

use crate::core::ConfiguredId;
use crate::effects::{combine_validations, from_result, into_result};
use crate::errors::{IdError, IdResult};
use crate::registry::IdRegistry;

use super::fragment_file::load_fragment_file;
use super::{builtin_fragments, DeclaredId, IdFragment};

/// Where the fragments of a catalog come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSources {
    pub include_builtin: bool,
    pub fragment_files: Vec<PathBuf>,
}

impl Default for CatalogSources {
    fn default() -> Self {
        Self {
            include_builtin: true,
            fragment_files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fragments: Vec<IdFragment>,
    registry: IdRegistry,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in fragments.
    pub fn with_builtin() -> IdResult<Self> {
        Self::load(&CatalogSources::default())
    }

    /// Load every source, collecting errors from all of them.
    ///
    /// Any error fails the whole load.
    pub fn load(sources: &CatalogSources) -> IdResult<Self> {
        let mut catalog = Self::new();
        let mut results = Vec::new();

        if sources.include_builtin {
            match builtin_fragments() {
                Ok(fragments) => {
                    for fragment in fragments {
                        results.push(from_result(catalog.add_fragment(fragment)));
                    }
                }
                Err(e) => results.push(from_result(Err(e))),
            }
        }

        for path in &sources.fragment_files {
            results.push(from_result(catalog.add_file(path)));
        }

        into_result(combine_validations(results))?;
        log::info!(
            "Catalog ready: {} fragments, {} IDs",
            catalog.fragments.len(),
            catalog.registry.len()
        );
        Ok(catalog)
    }

    /// Verify a fragment into the registry and keep it.
    pub fn add_fragment(&mut self, fragment: IdFragment) -> IdResult<usize> {
        let inserted = fragment.load_into(&mut self.registry)?;
        self.fragments.push(fragment);
        Ok(inserted)
    }

    pub fn add_file(&mut self, path: &Path) -> IdResult<usize> {
        let fragment = load_fragment_file(path)?;
        self.add_fragment(fragment)
    }

    pub fn registry(&self) -> &IdRegistry {
        &self.registry
    }

    pub fn fragments(&self) -> &[IdFragment] {
        &self.fragments
    }

    /// Every declared ID with its fragment, in load order.
    ///
    /// An identifier declared by two fragments (with the same hash) appears twice.
    pub fn ids(&self) -> impl Iterator<Item = (&IdFragment, &DeclaredId)> {
        self.fragments
            .iter()
            .flat_map(|f| f.ids().iter().map(move |d| (f, d)))
    }

    /// First declaration of an identifier.
    pub fn find(&self, id_name: &str) -> Option<(&IdFragment, &DeclaredId)> {
        self.ids().find(|(_, d)| d.id_name() == id_name)
    }

    pub fn get(&self, id_name: &str) -> IdResult<&ConfiguredId> {
        self.find(id_name)
            .map(|(_, d)| &d.configured)
            .ok_or_else(|| IdError::unknown_id(id_name))
    }
}
