//! Destination endpoint selection.
//!
//! Picks one endpoint from a trusted entity's published list. An
//! explicit `isDefault="true"` always wins; among the rest an unmarked
//! endpoint beats one explicitly marked `false`, matching the metadata
//! convention that omission implies usability while an explicit
//! `false` de-prioritizes.

use crate::error::{SsoError, SsoResult};
use crate::metadata::{EndpointCategory, EndpointDescriptor, EntityDescriptor};
use crate::saml::SamlBinding;

/// Optional explicit constraints on endpoint selection, typically
/// carried by the inbound request.
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    pub location: Option<String>,
    pub binding: Option<SamlBinding>,
    pub index: Option<u16>,
}

pub struct EndpointResolver;

impl EndpointResolver {
    /// Select one endpoint of `category` from `entity`'s metadata.
    ///
    /// Candidates are filtered on the overrides and the supported
    /// binding set, then scanned in document order: the first
    /// `isDefault="true"` short-circuits; otherwise the first unmarked
    /// candidate, then the first marked `false`. With no survivor the
    /// store's category fallback (restricted to supported bindings) is
    /// consulted before failing.
    pub fn resolve(
        entity: &EntityDescriptor,
        category: EndpointCategory,
        supported: &[SamlBinding],
        overrides: &EndpointOverrides,
    ) -> SsoResult<EndpointDescriptor> {
        let mut first_unset: Option<&EndpointDescriptor> = None;
        let mut first_false: Option<&EndpointDescriptor> = None;

        for endpoint in entity.endpoints(category) {
            if let Some(wanted) = overrides.location.as_deref() {
                if !locations_match(&endpoint.location, wanted) {
                    continue;
                }
            }
            if let Some(wanted) = overrides.binding {
                if endpoint.binding != wanted {
                    continue;
                }
            }
            // Index filtering applies only to index-addressable endpoints.
            if let (Some(wanted), Some(index)) = (overrides.index, endpoint.index) {
                if index != wanted {
                    continue;
                }
            }
            if !supported.contains(&endpoint.binding) {
                continue;
            }

            match endpoint.is_default {
                Some(true) => {
                    tracing::debug!(
                        entity_id = %entity.entity_id,
                        location = %endpoint.location,
                        "selected explicitly default endpoint"
                    );
                    return Ok(endpoint.clone());
                }
                Some(false) => {
                    if first_false.is_none() {
                        first_false = Some(endpoint);
                    }
                }
                None => {
                    if first_unset.is_none() {
                        first_unset = Some(endpoint);
                    }
                }
            }
        }

        if let Some(endpoint) = first_unset.or(first_false) {
            return Ok(endpoint.clone());
        }

        entity
            .default_endpoint(category, supported)
            .cloned()
            .ok_or_else(|| SsoError::EndpointResolution {
                entity_id: entity.entity_id.clone(),
                category,
            })
    }
}

/// Compare endpoint locations after URL normalization so scheme/host
/// case and trailing slashes do not defeat an explicit override.
fn locations_match(candidate: &str, wanted: &str) -> bool {
    match (normalize_location(candidate), normalize_location(wanted)) {
        (Some(a), Some(b)) => a == b,
        _ => candidate == wanted,
    }
}

fn normalize_location(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;

    let mut normalized = format!(
        "{}://{}",
        parsed.scheme().to_lowercase(),
        parsed.host_str().unwrap_or("").to_lowercase()
    );

    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }

    normalized.push_str(parsed.path().trim_end_matches('/'));

    if let Some(query) = parsed.query() {
        normalized.push('?');
        normalized.push_str(query);
    }

    Some(normalized)
}
