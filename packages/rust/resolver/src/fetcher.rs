//! Content Fetcher: reads minimal content metadata by UUID.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use url::Url;

use contentlink_shared::{ContentLinkError, ContentReference, ContentUuid, Result};

use crate::client::{ReadClient, ReadRequest};
use crate::url_ext::push_segment;

pub struct ContentFetcher {
    read: Arc<dyn ReadClient>,
    base_uri: Url,
    host: Option<String>,
}

impl ContentFetcher {
    /// `base_uri` is the content read root; `/{uuid}` is appended to it.
    pub fn new(read: Arc<dyn ReadClient>, base_uri: &str, host: Option<String>) -> Result<Self> {
        let base_uri = Url::parse(base_uri)
            .map_err(|e| ContentLinkError::invalid_url(base_uri, e.to_string()))?;
        if base_uri.cannot_be_a_base() {
            return Err(ContentLinkError::invalid_url(
                base_uri.as_str(),
                "URL cannot be a base",
            ));
        }
        Ok(Self {
            read,
            base_uri,
            host,
        })
    }

    pub fn content_url(&self, uuid: ContentUuid) -> Result<Url> {
        let mut url = self.base_uri.clone();
        push_segment(&mut url, &uuid.to_string())?;
        Ok(url)
    }

    /// Fetch the content reference for `uuid`.
    ///
    /// - 200 with a readable body: `Some(reference)`
    /// - 500/503, or 200 with an unreadable body: `ServiceUnavailable` error
    /// - anything else: `None`
    #[instrument(skip(self))]
    pub async fn fetch(&self, uuid: ContentUuid) -> Result<Option<ContentReference>> {
        let url = self.content_url(uuid)?;
        info!(%url, "looking up content");

        let response = self
            .read
            .get(ReadRequest {
                url,
                host: self.host.clone(),
            })
            .await?;

        match response.status {
            200 => serde_json::from_str::<ContentReference>(&response.body)
                .map(Some)
                .map_err(|e| {
                    ContentLinkError::ServiceUnavailable(format!(
                        "unreadable content for {uuid}: {e}"
                    ))
                }),
            500 | 503 => {
                warn!(status = response.status, "content read service unavailable");
                Err(ContentLinkError::ServiceUnavailable(format!(
                    "HTTP {} reading {uuid}",
                    response.status
                )))
            }
            status => {
                info!(status, "content not found");
                Ok(None)
            }
        }
    }
}
