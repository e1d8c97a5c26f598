//! Identifier Mapper: turns a URL into a publisher-scoped identifier.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use contentlink_shared::{BlogEndpoint, Identifier};

use crate::patterns::LinkPatterns;

/// Prefix of originating system ids.
const SYSTEM_ID_PREFIX: &str = "http://api.ft.com/system/";

/// Maps a URL to the system that published it.
///
/// Returns `None` when the URL does not belong to any known system.
pub trait AuthorityResolver: Send + Sync {
    fn resolve(&self, url: &str) -> Option<Identifier>;
}

/// Resolves authorities from the configured `[[blogs]]` endpoints.
///
/// A URL belongs to a blog when its `host + path` contains the blog's `host`
/// string. The first matching blog wins.
#[derive(Debug, Clone, Default)]
pub struct BlogAuthorityResolver {
    blogs: Vec<BlogEndpoint>,
}

impl BlogAuthorityResolver {
    pub fn new(blogs: Vec<BlogEndpoint>) -> Self {
        Self { blogs }
    }

    /// The originating system id for `url`, if a blog claims it.
    pub fn originating_system_id(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host_and_path = format!("{}{}", parsed.host_str()?, parsed.path());

        self.blogs
            .iter()
            .find(|blog| host_and_path.contains(&blog.host))
            .map(|blog| format!("{SYSTEM_ID_PREFIX}{}", blog.id))
    }
}

impl AuthorityResolver for BlogAuthorityResolver {
    fn resolve(&self, url: &str) -> Option<Identifier> {
        self.originating_system_id(url)
            .map(|authority| Identifier::new(authority, url))
    }
}

/// Thin seam in front of an [`AuthorityResolver`]; performs no I/O.
#[derive(Clone)]
pub struct IdentifierMapper {
    resolver: Arc<dyn AuthorityResolver>,
    patterns: Arc<LinkPatterns>,
}

impl IdentifierMapper {
    pub fn new(resolver: Arc<dyn AuthorityResolver>, patterns: Arc<LinkPatterns>) -> Self {
        Self { resolver, patterns }
    }

    /// Map `url` to an identifier. Only publisher article URLs can receive an
    /// authority; anything else yields a non-actionable identifier.
    pub fn map(&self, url: &str) -> Identifier {
        if self.patterns.is_publisher_article(url) {
            if let Some(identifier) = self.resolver.resolve(url).filter(Identifier::is_actionable) {
                return identifier;
            }
            debug!(%url, "no authority for publisher article");
        }
        Identifier::unqualified(url)
    }
}
