//! Serialization of the stroke history and the gesture-class samples.

use std::fmt::Write as _;

use crate::error::PersistenceResult;
use crate::pen::SurfaceRect;
use crate::stroke::{Stroke, StrokeElement};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Render the history as a standalone SVG document sized to `surface`.
///
/// Elements appear in history order, one `<path>` each, with their
/// attribute names in SVG's kebab-case.
pub fn to_vector_document(history: &[StrokeElement], surface: SurfaceRect) -> String {
    let mut doc = String::new();
    let _ = writeln!(
        doc,
        r#"<svg xmlns="{SVG_NS}" width="{}" height="{}" version="1.1">"#,
        surface.width, surface.height
    );
    doc.push_str("<g>\n");
    for element in history {
        let _ = write!(doc, "<{}", element.element_type().to_lowercase());
        for (name, value) in element.attributes() {
            let _ = write!(doc, r#" {}="{}""#, decamelize(name), escape_attr(&value));
        }
        doc.push_str("/>\n");
    }
    doc.push_str("</g>\n</svg>\n");
    doc
}

/// Serialize the samples as a JSON list of `{x, y, t}` lists
pub fn to_gesture_class_blob(samples: &[Stroke]) -> PersistenceResult<String> {
    Ok(serde_json::to_string(samples)?)
}

/// Reconstruct samples written by [`to_gesture_class_blob`]
pub fn from_gesture_class_blob(blob: &str) -> PersistenceResult<Vec<Stroke>> {
    Ok(serde_json::from_str(blob)?)
}

/// `strokeLinecap` -> `stroke-linecap`
fn decamelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
