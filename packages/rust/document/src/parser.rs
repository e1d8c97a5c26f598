//! Event-driven construction of a [`Document`] from `quick-xml` events.

use contentlink_shared::{ContentLinkError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use crate::{Attribute, Document, Element, NodeId, NodeKind};

pub(crate) fn parse(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    let mut doc = Document::empty();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root_seen = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ContentLinkError::parse(format!(
                "malformed XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => {
                let id = push_element(&mut doc, &start, false)?;
                attach_element(&mut doc, &stack, id, &mut root_seen)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                let id = push_element(&mut doc, &start, true)?;
                attach_element(&mut doc, &stack, id, &mut root_seen)?;
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(ContentLinkError::parse("unmatched closing tag"));
                }
            }
            Event::Text(t) => {
                let raw = utf8(&t)?;
                if stack.is_empty() && !raw.trim().is_empty() {
                    return Err(ContentLinkError::parse(
                        "character data outside the root element",
                    ));
                }
                attach(&mut doc, &stack, NodeKind::Text(raw));
            }
            Event::CData(c) => {
                if stack.is_empty() {
                    return Err(ContentLinkError::parse("CDATA outside the root element"));
                }
                let raw = utf8(&c)?;
                attach(&mut doc, &stack, NodeKind::CData(raw));
            }
            Event::Comment(c) => {
                let raw = utf8(&c)?;
                attach(&mut doc, &stack, NodeKind::Comment(raw));
            }
            Event::PI(pi) => {
                let raw = utf8(&pi)?;
                attach(&mut doc, &stack, NodeKind::ProcessingInstruction(raw));
            }
            Event::DocType(d) => {
                let raw = utf8(&d)?;
                attach(&mut doc, &stack, NodeKind::DocType(raw));
            }
            // The declaration is never re-emitted.
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(&open) = stack.last() {
        let name = doc.element(open).map(|el| el.name.clone()).unwrap_or_default();
        return Err(ContentLinkError::parse(format!("unclosed element <{name}>")));
    }
    if !root_seen {
        return Err(ContentLinkError::parse("document has no root element"));
    }

    trace!(nodes = doc.nodes.len(), "parsed document");
    Ok(doc)
}

fn push_element(doc: &mut Document, start: &BytesStart<'_>, self_closing: bool) -> Result<NodeId> {
    let name = utf8(start.name().as_ref())?;
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            ContentLinkError::parse(format!("malformed attribute on <{name}>: {e}"))
        })?;
        attributes.push(Attribute {
            name: utf8(attr.key.as_ref())?,
            raw_value: utf8(&attr.value)?,
        });
    }

    Ok(doc.push(NodeKind::Element(Element {
        name,
        attributes,
        self_closing,
    })))
}

fn attach_element(
    doc: &mut Document,
    stack: &[NodeId],
    id: NodeId,
    root_seen: &mut bool,
) -> Result<()> {
    if stack.is_empty() {
        if *root_seen {
            return Err(ContentLinkError::parse("document has more than one root element"));
        }
        *root_seen = true;
    }
    let parent = stack.last().copied().unwrap_or(doc.root());
    doc.append_child(parent, id);
    Ok(())
}

fn attach(doc: &mut Document, stack: &[NodeId], kind: NodeKind) {
    let parent = stack.last().copied().unwrap_or(doc.root());
    let id = doc.push(kind);
    doc.append_child(parent, id);
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| ContentLinkError::parse(format!("invalid UTF-8: {e}")))
}
