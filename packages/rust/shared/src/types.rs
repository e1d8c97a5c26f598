//! Core domain types for link resolution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ContentUuid
// ---------------------------------------------------------------------------

/// A content UUID as it appears in `/content/{uuid}` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUuid(pub Uuid);

impl std::fmt::Display for ContentUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Hyphenated lowercase, the form used in read endpoint paths.
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for ContentUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A publisher-scoped handle used to query the document store.
///
/// An identifier without an authority is non-actionable: resolution for the
/// candidate that produced it stops there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// System id qualifying the value, e.g. `http://api.ft.com/system/FT-LABS-WP-1-24`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    /// The identifier value, usually the article URL.
    pub value: String,
}

impl Identifier {
    /// An actionable identifier qualified by `authority`.
    pub fn new(authority: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            authority: Some(authority.into()),
            value: value.into(),
        }
    }

    /// A non-actionable identifier carrying only the value.
    pub fn unqualified(value: impl Into<String>) -> Self {
        Self {
            authority: None,
            value: value.into(),
        }
    }

    /// Whether this identifier can be looked up in the document store.
    pub fn is_actionable(&self) -> bool {
        self.authority.is_some()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.authority {
            Some(authority) => write!(f, "{authority}:{}", self.value),
            None => write!(f, "<none>:{}", self.value),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentReference
// ---------------------------------------------------------------------------

/// Minimal content metadata returned by the content read endpoint.
///
/// The endpoint returns a larger JSON document; everything except `id` and
/// `type` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentReference {
    /// Content id, possibly a full thing URI.
    pub id: String,
    /// Content type URI.
    #[serde(rename = "type")]
    pub content_type: String,
}
