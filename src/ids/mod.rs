//! Declared photon IDs.
//!
//! A fragment is one declaration unit: loose, medium and tight configured IDs
//! sharing one set of isolation inputs, each with the hash it was reviewed
//! with. Fragments come either from the built-in tables in this module or from
//! TOML files (see [`fragment_file`]).

pub mod catalog;
pub mod fragment_file;
pub mod spring16_v2p2_delayed_photon;
pub mod spring16_v2p2_delayed_photon_oot;

use serde::Serialize;

use crate::core::ConfiguredId;
use crate::effects::{combine_validations, from_result, into_result, validation_failure};
use crate::errors::{IdError, IdResult};
use crate::registry::{IdRegistry, Registration};

pub use catalog::Catalog;

/// A configured ID together with the hash declared for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaredId {
    pub configured: ConfiguredId,
    pub declared_hash: Option<String>,
}

impl DeclaredId {
    pub fn new(configured: ConfiguredId, declared_hash: Option<&str>) -> Self {
        Self {
            configured,
            declared_hash: declared_hash.map(str::to_string),
        }
    }

    pub fn id_name(&self) -> &str {
        self.configured.id_name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdFragment {
    name: String,
    ids: Vec<DeclaredId>,
}

impl IdFragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: Vec::new(),
        }
    }

    pub fn push(&mut self, id: DeclaredId) {
        self.ids.push(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ids(&self) -> &[DeclaredId] {
        &self.ids
    }

    pub fn find(&self, id_name: &str) -> Option<&DeclaredId> {
        self.ids.iter().find(|d| d.id_name() == id_name)
    }

    /// Verify and register every declared ID.
    ///
    /// All failures are collected. The registry is only updated when every ID
    /// passes, so a failed load leaves it untouched. Returns the number of
    /// newly inserted identifiers.
    pub fn load_into(&self, registry: &mut IdRegistry) -> IdResult<usize> {
        let mut staged = registry.clone();

        let results = self
            .ids
            .iter()
            .map(|declared| match &declared.declared_hash {
                Some(hash) => from_result(staged.register_configured(
                    &declared.configured,
                    hash,
                    Some(&self.name),
                )),
                None => validation_failure(IdError::missing_hash(declared.id_name())),
            })
            .collect();

        let outcomes = into_result(combine_validations(results))?;
        let inserted = outcomes
            .iter()
            .filter(|o| **o == Registration::Inserted)
            .count();

        log::info!(
            "Loaded fragment {} ({} IDs, {} new)",
            self.name,
            self.ids.len(),
            inserted
        );
        *registry = staged;
        Ok(inserted)
    }
}

/// Fragments compiled into the crate.
pub fn builtin_fragments() -> IdResult<Vec<IdFragment>> {
    Ok(vec![
        spring16_v2p2_delayed_photon::fragment()?,
        spring16_v2p2_delayed_photon_oot::fragment()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fragments_load_into_fresh_registry() {
        let mut registry = IdRegistry::new();
        for fragment in builtin_fragments().unwrap() {
            assert_eq!(fragment.load_into(&mut registry).unwrap(), 3);
        }
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_loading_twice_inserts_nothing_new() {
        let fragment = spring16_v2p2_delayed_photon::fragment().unwrap();
        let mut registry = IdRegistry::new();
        fragment.load_into(&mut registry).unwrap();
        assert_eq!(fragment.load_into(&mut registry).unwrap(), 0);
    }

    #[test]
    fn test_failed_load_leaves_registry_untouched() {
        let mut fragment = spring16_v2p2_delayed_photon::fragment().unwrap();
        fragment.ids[2].declared_hash = Some("0".repeat(32));
        fragment.ids[1].declared_hash = None;

        let mut registry = IdRegistry::new();
        let err = fragment.load_into(&mut registry).unwrap_err();

        let errors = err.into_errors();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], IdError::MissingHash { .. }));
        assert!(matches!(errors[1], IdError::HashMismatch { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_by_identifier() {
        let fragment = spring16_v2p2_delayed_photon_oot::fragment().unwrap();
        let found = fragment
            .find(spring16_v2p2_delayed_photon_oot::MEDIUM)
            .unwrap();
        assert_eq!(
            found.declared_hash.as_deref(),
            Some(spring16_v2p2_delayed_photon_oot::MEDIUM_HASH)
        );
        assert!(fragment.find("nope").is_none());
    }
}
