//! Redirect Resolver: follows probe redirects from a link to an identifier.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use url::Url;

use contentlink_shared::{ContentLinkError, Identifier, Result};

use crate::client::{ProbeClient, ProbeRequest};
use crate::mapper::IdentifierMapper;
use crate::patterns::LinkPatterns;

/// URLs visited while following one redirect chain, in visit order.
#[derive(Debug, Default)]
pub struct RedirectVisitSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl RedirectVisitSet {
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url.as_str())
    }

    /// Record a visit. Returns `false` if `url` was already visited.
    pub fn insert(&mut self, url: &Url) -> bool {
        let inserted = self.seen.insert(url.as_str().to_owned());
        if inserted {
            self.order.push(url.as_str().to_owned());
        }
        inserted
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    /// Visited URLs in the order they were first seen.
    pub fn chain(&self) -> &[String] {
        &self.order
    }
}

/// Follows redirects with header-only probes until it reaches a terminal
/// resource, a cycle, or the hop limit.
pub struct RedirectResolver {
    probe: Arc<dyn ProbeClient>,
    mapper: IdentifierMapper,
    patterns: Arc<LinkPatterns>,
    routing_cookie: Option<String>,
    max_redirects: usize,
}

impl RedirectResolver {
    pub fn new(
        probe: Arc<dyn ProbeClient>,
        mapper: IdentifierMapper,
        patterns: Arc<LinkPatterns>,
        routing_cookie: Option<String>,
        max_redirects: usize,
    ) -> Self {
        Self {
            probe,
            mapper,
            patterns,
            routing_cookie,
            max_redirects,
        }
    }

    /// Resolve `source` to an identifier.
    ///
    /// Publisher article URLs are mapped directly without any request. For
    /// everything else the chain is probed; unless a redirect lands on a
    /// mappable publisher article, the identifier is derived from `source`
    /// itself, whatever the final destination was. A cycle or an exhausted
    /// hop limit yields a non-actionable identifier.
    ///
    /// Errors only on a malformed `source` or a failed probe.
    #[instrument(skip(self))]
    pub async fn resolve(&self, source: &str) -> Result<Identifier> {
        if self.patterns.is_publisher_article(source) {
            return Ok(self.mapper.map(source));
        }

        let mut current =
            Url::parse(source).map_err(|e| ContentLinkError::invalid_url(source, e.to_string()))?;
        let mut visited = RedirectVisitSet::default();

        loop {
            if visited.contains(&current) {
                warn!(
                    %source,
                    chain = ?visited.chain(),
                    revisited = %current,
                    "encountered circular redirection"
                );
                return Ok(Identifier::unqualified(source));
            }
            if visited.len() >= self.max_redirects {
                warn!(
                    %source,
                    chain = ?visited.chain(),
                    max_redirects = self.max_redirects,
                    "too many redirects"
                );
                return Ok(Identifier::unqualified(source));
            }

            let cookie = if self.patterns.is_publisher_host(current.as_str()) {
                self.routing_cookie.clone()
            } else {
                None
            };
            let request = ProbeRequest {
                cookie,
                ..ProbeRequest::new(current.clone())
            };
            let response = self.probe.probe(request).await?;
            visited.insert(&current);

            if !response.is_redirect() {
                if response.status != 200 {
                    warn!(
                        %source,
                        resolved = %current,
                        status = response.status,
                        "link resolved to unexpected status"
                    );
                }
                return Ok(self.mapper.map(source));
            }

            let Some(location) = response.location else {
                warn!(
                    %source,
                    resolved = %current,
                    status = response.status,
                    "redirect without Location"
                );
                return Ok(self.mapper.map(source));
            };

            let next = match current.join(&location) {
                Ok(next) => next,
                Err(e) => {
                    warn!(%source, %location, error = %e, "redirect target is not a valid URL");
                    return Ok(self.mapper.map(source));
                }
            };
            debug!(from = %current, to = %next, "following redirect");

            if self.patterns.is_publisher_article(next.as_str()) {
                let identifier = self.mapper.map(next.as_str());
                if identifier.is_actionable() {
                    return Ok(identifier);
                }
            }
            current = next;
        }
    }
}
