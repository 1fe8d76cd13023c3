//! Entity registry
//!
//! The registry maps an entity's external name to its remote endpoint path
//! and unique-id attribute. It is built once at startup and never mutated;
//! concurrent reads are safe by construction. Iteration order is insertion
//! order, which doubles as the deterministic tie-break for envelope
//! detection.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

/// Envelope keys tried after the entity names themselves, for upstreams
/// that wrap their record list in a generic field
const FALLBACK_ENVELOPE_KEYS: &[&str] = &["objects", "response"];

/// Static descriptor for one entity exposed by the datasource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    /// External name of the entity, as sent by callers and as it may appear
    /// as the envelope key in responses (e.g. "User")
    pub external_id: String,
    /// Path segment appended to the datasource address (e.g. "users")
    pub endpoint: String,
    /// Name of the attribute holding each record's unique id
    pub unique_id_attribute: String,
}

impl EntityDescriptor {
    /// Create a new descriptor
    pub fn new(
        external_id: impl Into<String>,
        endpoint: impl Into<String>,
        unique_id_attribute: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            endpoint: endpoint.into(),
            unique_id_attribute: unique_id_attribute.into(),
        }
    }
}

/// Ordered, read-only registry of the entities this adapter can serve
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: Vec<EntityDescriptor>,
}

impl EntityRegistry {
    /// Build a registry from descriptors, rejecting duplicate external ids
    pub fn new(entries: Vec<EntityDescriptor>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|e| e.external_id == entry.external_id)
            {
                return Err(Error::invalid_entity_config(format!(
                    "duplicate entity external ID in registry: {}",
                    entry.external_id
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in registry, shared process-wide
    pub fn builtin() -> Arc<EntityRegistry> {
        static BUILTIN: Lazy<Arc<EntityRegistry>> = Lazy::new(|| {
            Arc::new(
                EntityRegistry::new(vec![
                    EntityDescriptor::new("User", "users", "id"),
                    EntityDescriptor::new("Group", "groups", "id"),
                ])
                .expect("built-in registry has unique entity ids"),
            )
        });
        Arc::clone(&BUILTIN)
    }

    /// Look up a descriptor by external id
    pub fn get(&self, external_id: &str) -> Option<&EntityDescriptor> {
        self.entries.iter().find(|e| e.external_id == external_id)
    }

    /// Check whether an external id is registered
    pub fn contains(&self, external_id: &str) -> bool {
        self.get(external_id).is_some()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entries.iter()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Envelope keys to probe when locating the record list in a response:
    /// entity names in registration order, then the generic fallbacks
    pub fn candidate_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.external_id.as_str())
            .chain(FALLBACK_ENVELOPE_KEYS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entities() {
        let registry = EntityRegistry::builtin();
        assert_eq!(registry.len(), 2);

        let user = registry.get("User").unwrap();
        assert_eq!(user.endpoint, "users");
        assert_eq!(user.unique_id_attribute, "id");

        assert!(registry.contains("Group"));
        assert!(!registry.contains("Widget"));
    }

    #[test]
    fn test_candidate_keys_order_is_stable() {
        let registry = EntityRegistry::builtin();
        let keys: Vec<&str> = registry.candidate_keys().collect();
        assert_eq!(keys, vec!["User", "Group", "objects", "response"]);
    }

    #[test]
    fn test_duplicate_external_id_rejected() {
        let err = EntityRegistry::new(vec![
            EntityDescriptor::new("User", "users", "id"),
            EntityDescriptor::new("User", "people", "uuid"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
