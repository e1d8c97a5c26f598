//! Compiled URL patterns shared by classification and resolution.

use regex::Regex;

use contentlink_shared::{ContentLinkError, ContentUuid, ResolverConfig, Result};

/// Lowercase hyphenated UUID.
const UUID_PATTERN: &str =
    "([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})";

/// Regexes derived from the publisher domain and the configured shorteners.
///
/// All patterns are anchored and must match the whole URL.
#[derive(Debug, Clone)]
pub struct LinkPatterns {
    /// `…/content/{uuid}` at the end of the URL.
    content_uuid: Regex,
    /// Any URL on the publisher domain with a UUID somewhere in its path.
    href_uuid: Regex,
    /// Date-segmented article URLs on a publisher subdomain.
    publisher_article: Regex,
    /// Any URL on a publisher subdomain (gets the routing cookie).
    publisher_host: Regex,
    shorteners: Vec<Regex>,
}

impl LinkPatterns {
    /// Compile patterns for `publisher_domain` plus the given shortener regexes.
    pub fn new(publisher_domain: &str, shortener_patterns: &[String]) -> Result<Self> {
        let domain = regex::escape(publisher_domain);

        let shorteners = shortener_patterns
            .iter()
            .map(|p| compile(&format!("^(?:{p})$")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            content_uuid: compile(&format!(r"^.*/content/{UUID_PATTERN}$"))?,
            href_uuid: compile(&format!(r"^.*{domain}/\S*{UUID_PATTERN}.*$"))?,
            publisher_article: compile(&format!(
                r"^https?://([^.]+\.)?[^.]+\.{domain}/(\S*/)?\d{{4}}/\d{{2}}/\d{{2}}/.*/$"
            ))?,
            publisher_host: compile(&format!(r"^https?://[^/]+\.{domain}/(.*)$"))?,
            shorteners,
        })
    }

    /// Compile patterns from runtime configuration.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(&config.publisher_domain, &config.shortener_patterns)
    }

    /// UUID of a direct content link, if `url` is one.
    pub fn direct_content_uuid(&self, url: &str) -> Option<ContentUuid> {
        self.href_uuid
            .captures(url)
            .or_else(|| self.content_uuid.captures(url))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// UUID from a document-store redirect target ending in `/content/{uuid}`.
    pub fn content_path_uuid(&self, url: &str) -> Option<ContentUuid> {
        self.content_uuid
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    pub fn is_shortened(&self, url: &str) -> bool {
        self.shorteners.iter().any(|p| p.is_match(url))
    }

    pub fn is_publisher_article(&self, url: &str) -> bool {
        self.publisher_article.is_match(url)
    }

    pub fn is_publisher_host(&self, url: &str) -> bool {
        self.publisher_host.is_match(url)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ContentLinkError::config(format!("invalid link pattern {pattern:?}: {e}")))
}
