//! Writes a [`Document`] back to text.

use contentlink_shared::{ContentLinkError, Result};

use crate::{Document, Element, NodeId, NodeKind};

enum Step {
    Open(NodeId),
    Close(NodeId),
}

pub(crate) fn serialize(doc: &Document) -> Result<String> {
    let mut out = String::new();
    let mut steps: Vec<Step> = doc
        .children(doc.root())
        .iter()
        .rev()
        .map(|&id| Step::Open(id))
        .collect();

    while let Some(step) = steps.pop() {
        match step {
            Step::Open(id) => match doc.kind(id) {
                NodeKind::Element(element) => {
                    let children = doc.children(id);
                    write_start(&mut out, element)?;
                    if children.is_empty() && element.self_closing {
                        out.push_str("/>");
                    } else {
                        out.push('>');
                        steps.push(Step::Close(id));
                        steps.extend(children.iter().rev().map(|&c| Step::Open(c)));
                    }
                }
                NodeKind::Text(raw) => out.push_str(raw),
                NodeKind::CData(raw) => {
                    out.push_str("<![CDATA[");
                    out.push_str(raw);
                    out.push_str("]]>");
                }
                NodeKind::Comment(raw) => {
                    out.push_str("<!--");
                    out.push_str(raw);
                    out.push_str("-->");
                }
                NodeKind::ProcessingInstruction(raw) => {
                    out.push_str("<?");
                    out.push_str(raw);
                    out.push_str("?>");
                }
                NodeKind::DocType(raw) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(raw.trim_start());
                    out.push('>');
                }
                NodeKind::Document => {
                    return Err(ContentLinkError::Serialization(
                        "document node found below the root".into(),
                    ));
                }
            },
            Step::Close(id) => {
                if let Some(element) = doc.element(id) {
                    out.push_str("</");
                    out.push_str(&element.name);
                    out.push('>');
                }
            }
        }
    }

    Ok(out)
}

fn write_start(out: &mut String, element: &Element) -> Result<()> {
    if element.name.is_empty() {
        return Err(ContentLinkError::Serialization(
            "element with an empty name".into(),
        ));
    }
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        // Raw values from single-quoted attributes may contain `"`.
        out.push_str(&attr.raw_value.replace('"', "&quot;"));
        out.push('"');
    }
    Ok(())
}
