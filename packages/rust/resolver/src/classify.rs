//! Link Classifier: picks the anchors worth resolving.

use tracing::warn;

use contentlink_document::{Document, NodeId};
use contentlink_shared::ContentUuid;

use crate::patterns::LinkPatterns;

/// Why an anchor was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// The href already names the content.
    DirectContentLink(ContentUuid),
    /// The href matches a configured URL shortener.
    ShortenedLink,
    /// The href is a date-segmented article URL on the publisher domain.
    PublisherArticleLink,
}

/// An anchor selected for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCandidate {
    pub node: NodeId,
    pub href: String,
    pub kind: LinkKind,
}

/// Classification result: what will be resolved and what was left out.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// The first `max_links` candidates, in document order.
    pub candidates: Vec<AnchorCandidate>,
    /// Hrefs of candidates beyond `max_links`, in document order.
    pub omitted: Vec<String>,
}

/// Classify a single href.
pub fn classify_href(patterns: &LinkPatterns, href: &str) -> Option<LinkKind> {
    if href.is_empty() {
        return None;
    }
    if let Some(uuid) = patterns.direct_content_uuid(href) {
        Some(LinkKind::DirectContentLink(uuid))
    } else if patterns.is_shortened(href) {
        Some(LinkKind::ShortenedLink)
    } else if patterns.is_publisher_article(href) {
        Some(LinkKind::PublisherArticleLink)
    } else {
        None
    }
}

/// Select every `<a>` whose href is a candidate, keeping at most `max_links`.
pub fn classify(document: &Document, patterns: &LinkPatterns, max_links: usize) -> Classified {
    let mut candidates: Vec<AnchorCandidate> = document
        .elements_named("a")
        .filter_map(|node| {
            let href = document.attribute(node, "href")?;
            let kind = classify_href(patterns, &href)?;
            Some(AnchorCandidate { node, href, kind })
        })
        .collect();

    let omitted: Vec<String> = if candidates.len() > max_links {
        candidates
            .split_off(max_links)
            .into_iter()
            .map(|candidate| candidate.href)
            .collect()
    } else {
        Vec::new()
    };

    if !omitted.is_empty() {
        warn!(
            max_links,
            omitted = ?omitted,
            "article contains too many links to resolve"
        );
    }

    Classified {
        candidates,
        omitted,
    }
}
