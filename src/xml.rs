use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};
use sxd_document::parser;
use thiserror::Error;

const INDENT: &str = "  ";

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed XML: {0}")]
    Parse(#[from] parser::Error),
}

/// Identity transform with indentation: parse the document and write it
/// back out with each nesting level indented by two spaces.
///
/// Elements holding only text stay on one line, empty elements self-close,
/// and text interleaved with child elements is treated as ignorable
/// whitespace and dropped. Namespaced attributes re-declare their prefix
/// on the element carrying them.
pub fn pretty_print(text: &str) -> Result<String, Error> {
    let package = parser::parse(text)?;
    let doc = package.as_document();

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    for child in doc.root().children() {
        if let ChildOfRoot::Element(el) = child {
            write_element(&mut out, el, 0, None);
        }
    }
    Ok(out)
}

/// Number of `Contents` entries in a bucket listing, regardless of
/// namespace. `None` when the document is not a listing at all.
pub fn object_count(text: &str) -> Option<usize> {
    let package = parser::parse(text).ok()?;
    let doc = package.as_document();
    let count = sxd_xpath::evaluate_xpath(&doc, "count(/*/*[local-name()='Contents'])").ok()?;
    Some(count.number() as usize)
}

fn write_element(out: &mut String, el: Element, depth: usize, inherited_ns: Option<&str>) {
    let pad = INDENT.repeat(depth);
    let name = el.name().local_part();
    let ns = el.name().namespace_uri();

    out.push_str(&pad);
    out.push('<');
    out.push_str(name);
    if ns != inherited_ns {
        match ns {
            Some(uri) => out.push_str(&format!(" xmlns=\"{}\"", escape(uri))),
            // Undeclare the inherited default namespace.
            None => out.push_str(" xmlns=\"\""),
        }
    }
    for attr in el.attributes() {
        let attr_name = attr.name();
        match (attr_name.namespace_uri(), attr.preferred_prefix()) {
            (Some(uri), Some(prefix)) => out.push_str(&format!(
                " xmlns:{prefix}=\"{}\" {prefix}:{}=\"{}\"",
                escape(uri),
                attr_name.local_part(),
                escape(attr.value())
            )),
            _ => out.push_str(&format!(
                " {}=\"{}\"",
                attr_name.local_part(),
                escape(attr.value())
            )),
        }
    }

    let child_elements: Vec<Element> = el
        .children()
        .iter()
        .filter_map(|child| match child {
            ChildOfElement::Element(el) => Some(*el),
            _ => None,
        })
        .collect();

    if !child_elements.is_empty() {
        out.push_str(">\n");
        for child in child_elements {
            write_element(out, child, depth + 1, ns);
        }
        out.push_str(&pad);
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
    } else {
        let text: String = el
            .children()
            .iter()
            .filter_map(|child| match child {
                ChildOfElement::Text(text) => Some(text.text()),
                _ => None,
            })
            .collect();
        if text.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push('>');
            out.push_str(&escape(&text));
            out.push_str("</");
            out.push_str(name);
            out.push_str(">\n");
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
