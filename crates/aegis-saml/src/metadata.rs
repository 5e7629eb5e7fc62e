//! Relying-party metadata: the trust store this engine reads.
//!
//! Metadata documents are parsed and persisted elsewhere; the engine
//! only consumes the resulting endpoint lists through [`MetadataStore`].

use crate::saml::SamlBinding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Endpoint categories published in relying-party metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointCategory {
    AssertionConsumerService,
    SingleLogoutService,
    ArtifactResolutionService,
}

impl fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AssertionConsumerService => "AssertionConsumerService",
            Self::SingleLogoutService => "SingleLogoutService",
            Self::ArtifactResolutionService => "ArtifactResolutionService",
        })
    }
}

/// One endpoint a relying party published for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub category: EndpointCategory,
    pub binding: SamlBinding,
    pub location: String,
    /// Present only for index-addressable endpoint types.
    pub index: Option<u16>,
    /// Three-state default marker: explicitly `true`, explicitly
    /// `false`, or absent from the metadata entirely.
    pub is_default: Option<bool>,
}

impl EndpointDescriptor {
    #[must_use]
    pub fn new(
        category: EndpointCategory,
        binding: SamlBinding,
        location: impl Into<String>,
    ) -> Self {
        Self {
            category,
            binding,
            location: location.into(),
            index: None,
            is_default: None,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: u16) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}

/// A trusted entity's published endpoints, in metadata document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub entity_id: String,
    endpoints: Vec<EndpointDescriptor>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            endpoints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Endpoints of one category, preserving document order.
    pub fn endpoints(
        &self,
        category: EndpointCategory,
    ) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints
            .iter()
            .filter(move |e| e.category == category)
    }

    /// Category-specific fallback lookup used when no published
    /// endpoint survives explicit filtering: the first endpoint of the
    /// category whose binding is in the supported set.
    #[must_use]
    pub fn default_endpoint(
        &self,
        category: EndpointCategory,
        supported: &[SamlBinding],
    ) -> Option<&EndpointDescriptor> {
        self.endpoints(category)
            .find(|e| supported.contains(&e.binding))
    }
}

/// The trust store: which entities this `IdP` has a relationship with,
/// and their metadata. Read-only from the engine's perspective.
pub trait MetadataStore: Send + Sync {
    fn is_valid_entity(&self, entity_id: &str) -> bool;

    fn entity_descriptor(&self, entity_id: &str) -> Option<&EntityDescriptor>;
}

/// Trust store backed by a plain map, for static deployments and
/// tests.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    entities: HashMap<String, EntityDescriptor>,
}

impl InMemoryMetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, descriptor: EntityDescriptor) {
        self.entities
            .insert(descriptor.entity_id.clone(), descriptor);
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn is_valid_entity(&self, entity_id: &str) -> bool {
        self.entities.contains_key(entity_id)
    }

    fn entity_descriptor(&self, entity_id: &str) -> Option<&EntityDescriptor> {
        self.entities.get(entity_id)
    }
}
