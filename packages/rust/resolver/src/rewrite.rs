//! Document Rewriter: swaps a resolved anchor for a content reference.

use contentlink_document::{Document, NodeId};
use contentlink_shared::{ContentReference, Result};

/// Name of the replacement element.
pub const CONTENT_ELEMENT: &str = "content";

#[derive(Debug, Clone)]
pub struct DocumentRewriter {
    thing_uri_prefix: String,
}

impl DocumentRewriter {
    pub fn new(thing_uri_prefix: impl Into<String>) -> Self {
        Self {
            thing_uri_prefix: thing_uri_prefix.into(),
        }
    }

    /// Bare content id with the thing URI prefix removed.
    pub fn content_id<'a>(&self, id: &'a str) -> &'a str {
        id.strip_prefix(self.thing_uri_prefix.as_str()).unwrap_or(id)
    }

    /// Replace `anchor` with `<content id=".." type="..">`, moving the anchor's
    /// children under it. Returns whether the document changed.
    pub fn replace(
        &self,
        document: &mut Document,
        anchor: NodeId,
        reference: Option<&ContentReference>,
    ) -> Result<bool> {
        let Some(reference) = reference else {
            return Ok(false);
        };

        let content = document.create_element(
            CONTENT_ELEMENT,
            &[
                ("id", self.content_id(&reference.id)),
                ("type", reference.content_type.as_str()),
            ],
        )?;
        document.replace_element(anchor, content)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UUID: &str = "5c9c9ea0-6c3e-11e5-8171-ba1968cf791a";
    const ARTICLE: &str = "http://www.ft.com/ontology/content/Article";

    fn rewriter() -> DocumentRewriter {
        DocumentRewriter::new("http://www.ft.com/thing/")
    }

    #[test]
    fn strips_thing_prefix() {
        let r = rewriter();
        assert_eq!(r.content_id(&format!("http://www.ft.com/thing/{UUID}")), UUID);
        assert_eq!(r.content_id(UUID), UUID);
    }

    #[test]
    fn replaces_anchor_in_place() {
        let mut doc = Document::parse(
            r#"<body><p>See <a href="http://on.ft.com/x" title="t">the <b>story</b></a>.</p></body>"#,
        )
        .unwrap();
        let anchor = doc.elements_named("a").next().unwrap();
        let reference = ContentReference {
            id: format!("http://www.ft.com/thing/{UUID}"),
            content_type: ARTICLE.into(),
        };

        assert!(rewriter().replace(&mut doc, anchor, Some(&reference)).unwrap());
        assert_eq!(
            doc.serialize().unwrap(),
            format!(
                r#"<body><p>See <content id="{UUID}" type="{ARTICLE}">the <b>story</b></content>.</p></body>"#
            )
        );
    }

    #[test]
    fn absent_reference_is_no_change() {
        let body = r#"<body><a href="http://on.ft.com/x">x</a></body>"#;
        let mut doc = Document::parse(body).unwrap();
        let anchor = doc.elements_named("a").next().unwrap();

        assert!(!rewriter().replace(&mut doc, anchor, None).unwrap());
        assert_eq!(doc.serialize().unwrap(), body);
    }
}
