//! Registry of configured IDs keyed by identifier.
//!
//! Each identifier maps to the MD5 content hash it was reviewed with.
//! Registration is insert-or-verify: a new identifier is inserted, the same
//! identifier with the same hash is accepted again, and the same identifier
//! with a different hash is rejected. A mismatch means cut values were edited
//! without the hash being updated and is always a hard error.

pub mod hash;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::ConfiguredId;
use crate::errors::{IdError, IdResult};

/// What a successful registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The identifier was already registered with the same hash
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub hash: String,
    /// Fragment or file the identifier was first registered from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IdRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id_name -> hash`, or verify it against an existing entry.
    pub fn register(&mut self, id_name: &str, hash: &str) -> IdResult<Registration> {
        self.register_from(id_name, hash, None)
    }

    /// Like [`Self::register`], recording where the entry came from.
    pub fn register_from(
        &mut self,
        id_name: &str,
        hash: &str,
        source: Option<&str>,
    ) -> IdResult<Registration> {
        if !hash::is_well_formed(hash.trim()) {
            return Err(IdError::malformed_hash(id_name, hash));
        }
        let hash = hash::normalize(hash);

        match self.entries.get(id_name) {
            Some(existing) if existing.hash == hash => {
                log::debug!("{} already registered with matching hash", id_name);
                Ok(Registration::AlreadyPresent)
            }
            Some(existing) => Err(IdError::registry_conflict(
                id_name,
                existing.hash.clone(),
                hash,
            )),
            None => {
                log::debug!("Registered {} -> {}", id_name, hash);
                self.entries.insert(
                    id_name.to_string(),
                    RegistryEntry {
                        hash,
                        source: source.map(str::to_string),
                    },
                );
                Ok(Registration::Inserted)
            }
        }
    }

    /// Recompute the content hash of `id`, compare it to `declared_hash`, then register.
    ///
    /// Nothing is inserted when the hashes disagree.
    pub fn register_configured(
        &mut self,
        id: &ConfiguredId,
        declared_hash: &str,
        source: Option<&str>,
    ) -> IdResult<Registration> {
        if !hash::is_well_formed(declared_hash.trim()) {
            return Err(IdError::malformed_hash(id.id_name(), declared_hash));
        }

        let declared = hash::normalize(declared_hash);
        let computed = id.content_hash();
        if declared != computed {
            return Err(IdError::hash_mismatch(id.id_name(), declared, computed));
        }

        self.register_from(id.id_name(), &computed, source)
    }

    pub fn get(&self, id_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(id_name)
    }

    pub fn hash_of(&self, id_name: &str) -> Option<&str> {
        self.entries.get(id_name).map(|e| e.hash.as_str())
    }

    pub fn contains(&self, id_name: &str) -> bool {
        self.entries.contains_key(id_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
