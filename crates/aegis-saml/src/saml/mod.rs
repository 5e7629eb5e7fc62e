//! SAML 2.0 protocol vocabulary shared across the engine.

pub mod assertion;
pub mod attributes;
pub mod messages;

pub use assertion::{
    Assertion, AuthnStatement, Conditions, NameId, SubjectConfirmation, SubjectConfirmationData,
    SubjectConfirmationMethod,
};
pub use attributes::{Attribute, AttributeResolver, StaticAttributeResolver};
pub use messages::{AuthnRequest, LogoutRequest, SamlMessage};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default authentication context class asserted when the request does
/// not ask for one.
pub const AUTHN_CONTEXT_PASSWORD: &str = "urn:oasis:names:tc:SAML:2.0:ac:classes:Password";

/// Password over protected transport authentication context class.
pub const AUTHN_CONTEXT_PASSWORD_PROTECTED_TRANSPORT: &str =
    "urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport";

/// SAML binding identifiers this engine understands.
///
/// The last two are recognized in metadata but have no transportable
/// profile; the [`crate::bindings::BindingRegistry`] refuses to accept
/// an implementation for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamlBinding {
    /// HTTP POST binding.
    HttpPost,
    /// HTTP Redirect binding.
    HttpRedirect,
    /// HTTP Artifact binding.
    HttpArtifact,
    /// SOAP binding.
    Soap,
    /// Holder-of-key SSO browser profile.
    HolderOfKeySso,
    /// Raw DEFLATE URL-encoding identifier.
    UrlEncodingDeflate,
}

impl SamlBinding {
    /// Returns the URI for this binding.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::HttpPost => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST",
            Self::HttpRedirect => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect",
            Self::HttpArtifact => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact",
            Self::Soap => "urn:oasis:names:tc:SAML:2.0:bindings:SOAP",
            Self::HolderOfKeySso => "urn:oasis:names:tc:SAML:2.0:profiles:holder-of-key:SSO:browser",
            Self::UrlEncodingDeflate => "urn:oasis:names:tc:SAML:2.0:bindings:URL-Encoding:DEFLATE",
        }
    }

    /// Parses a binding from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" => Some(Self::HttpPost),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" => Some(Self::HttpRedirect),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact" => Some(Self::HttpArtifact),
            "urn:oasis:names:tc:SAML:2.0:bindings:SOAP" => Some(Self::Soap),
            "urn:oasis:names:tc:SAML:2.0:profiles:holder-of-key:SSO:browser" => {
                Some(Self::HolderOfKeySso)
            }
            "urn:oasis:names:tc:SAML:2.0:bindings:URL-Encoding:DEFLATE" => {
                Some(Self::UrlEncodingDeflate)
            }
            _ => None,
        }
    }

    /// Whether a transport implementation may be registered for this
    /// binding identifier.
    #[must_use]
    pub const fn is_transportable(&self) -> bool {
        matches!(
            self,
            Self::HttpPost | Self::HttpRedirect | Self::HttpArtifact | Self::Soap
        )
    }
}

impl fmt::Display for SamlBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// SAML name identifier formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NameIdFormat {
    /// Unspecified name ID format.
    #[default]
    Unspecified,
    /// Email address format.
    Email,
    /// Persistent identifier format.
    Persistent,
    /// Transient identifier format.
    Transient,
}

impl NameIdFormat {
    /// Returns the URI for this name ID format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::Email => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::Persistent => "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            Self::Transient => "urn:oasis:names:tc:SAML:2.0:nameid-format:transient",
        }
    }

    /// Parses a name ID format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress" => Some(Self::Email),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent" => Some(Self::Persistent),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" => Some(Self::Transient),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_uri_roundtrip() {
        for binding in [
            SamlBinding::HttpPost,
            SamlBinding::HttpRedirect,
            SamlBinding::HttpArtifact,
            SamlBinding::Soap,
            SamlBinding::HolderOfKeySso,
            SamlBinding::UrlEncodingDeflate,
        ] {
            assert_eq!(SamlBinding::from_uri(binding.uri()), Some(binding));
        }
    }

    #[test]
    fn only_wire_bindings_are_transportable() {
        assert!(SamlBinding::HttpPost.is_transportable());
        assert!(SamlBinding::Soap.is_transportable());
        assert!(!SamlBinding::HolderOfKeySso.is_transportable());
        assert!(!SamlBinding::UrlEncodingDeflate.is_transportable());
    }

    #[test]
    fn name_id_format_uri_roundtrip() {
        for format in [
            NameIdFormat::Unspecified,
            NameIdFormat::Email,
            NameIdFormat::Persistent,
            NameIdFormat::Transient,
        ] {
            assert_eq!(NameIdFormat::from_uri(format.uri()), Some(format));
        }
    }
}
