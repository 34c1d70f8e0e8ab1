//! Pretty-printing XML writer
//!
//! Output layout: XML 1.0 declaration with UTF-8 encoding, a doctype naming
//! the root element without public or system identifiers, two-space
//! indentation and `\n` line endings. Text is escaped, never wrapped in CDATA.

use crate::element::{Content, Element};
use crate::Result;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Renders a full document rooted at `root`
pub fn render_document(root: &Element) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(out, "<!DOCTYPE {}>", root.name)?;
    write_element(&mut out, root, 0)?;
    Ok(out)
}

/// Renders a single element and its subtree
pub fn render_element(element: &Element) -> Result<String> {
    let mut out = String::new();
    write_element(&mut out, element, 0)?;
    Ok(out)
}

fn write_element<W: Write>(out: &mut W, element: &Element, depth: usize) -> std::fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    write!(out, "<{}", element.name)?;
    for (key, value) in &element.attributes {
        write!(out, " {}=\"{}\"", key, escape_attr(value))?;
    }

    match &element.content {
        Content::Text(text) if text.is_empty() => writeln!(out, "/>"),
        Content::Text(text) => writeln!(out, ">{}</{}>", escape_text(text), element.name),
        Content::Children(children) if children.is_empty() => writeln!(out, "/>"),
        Content::Children(children) => {
            writeln!(out, ">")?;
            for child in children {
                write_element(out, child, depth + 1)?;
            }
            for _ in 0..depth {
                out.write_str(INDENT)?;
            }
            writeln!(out, "</{}>", element.name)
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
