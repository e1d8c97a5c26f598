//! Small URL helpers for building endpoint URIs.

use url::Url;

use contentlink_shared::{ContentLinkError, Result};

/// Parse `base` and append one path segment to it, percent-encoding the segment.
pub(crate) fn append_path(base: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ContentLinkError::invalid_url(base, e.to_string()))?;
    push_segment(&mut url, segment)?;
    Ok(url)
}

/// Append one path segment to `url`, dropping a trailing empty segment first.
pub(crate) fn push_segment(url: &mut Url, segment: &str) -> Result<()> {
    let display = url.to_string();
    url.path_segments_mut()
        .map_err(|_| ContentLinkError::invalid_url(display, "URL cannot be a base"))?
        .pop_if_empty()
        .push(segment);
    Ok(())
}
