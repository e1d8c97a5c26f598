//! Content Locator: finds the content UUID for an identifier in the document store.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use url::Url;

use contentlink_shared::{ContentUuid, Identifier, Result};

use crate::client::{ProbeClient, ProbeRequest};
use crate::patterns::LinkPatterns;
use crate::url_ext::append_path;

/// Document store path that redirects identifier queries to content.
const QUERY_PATH: &str = "content-query";

pub struct ContentLocator {
    probe: Arc<dyn ProbeClient>,
    query_uri: Url,
    host: Option<String>,
    patterns: Arc<LinkPatterns>,
}

impl ContentLocator {
    /// `base_uri` is the document store root; the query path is appended to it.
    pub fn new(
        probe: Arc<dyn ProbeClient>,
        base_uri: &str,
        host: Option<String>,
        patterns: Arc<LinkPatterns>,
    ) -> Result<Self> {
        Ok(Self {
            probe,
            query_uri: append_path(base_uri, QUERY_PATH)?,
            host,
            patterns,
        })
    }

    /// The query URL for `identifier`, or `None` if it has no authority.
    pub fn query_url(&self, identifier: &Identifier) -> Option<Url> {
        let authority = identifier.authority.as_deref()?;
        let mut url = self.query_uri.clone();
        url.query_pairs_mut()
            .append_pair("identifierAuthority", authority)
            .append_pair("identifierValue", &identifier.value);
        Some(url)
    }

    /// Look up `identifier`. A redirect to `…/content/{uuid}` is a match;
    /// every other answer, including request failures, is "not found".
    #[instrument(skip(self), fields(identifier = %identifier))]
    pub async fn locate(&self, identifier: &Identifier) -> Option<ContentUuid> {
        let url = self.query_url(identifier)?;
        info!(%url, "querying document store");

        let request = ProbeRequest {
            host: self.host.clone(),
            ..ProbeRequest::new(url)
        };
        let response = match self.probe.probe(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "failed to query document store");
                return None;
            }
        };

        if !response.is_redirect() {
            warn!(status = response.status, "no content found in document store");
            return None;
        }

        let location = response.location.unwrap_or_default();
        match self.patterns.content_path_uuid(&location) {
            Some(uuid) => {
                info!(%location, %uuid, "document store match");
                Some(uuid)
            }
            None => {
                warn!(%location, "document store redirected to a non-content location");
                None
            }
        }
    }
}
