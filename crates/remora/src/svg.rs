use std::fmt::Write as _;

/// Appends a coordinate for an SVG attribute.
///
/// Values within 1e-6 of an integer print as that integer, `-0` prints as `0`, and non-finite
/// values print as `0`.
pub(crate) fn fmt_into(out: &mut String, v: f64) {
    let v = if v.is_finite() { v } else { 0.0 };
    let whole = v.round();
    let v = if (v - whole).abs() < 1e-6 { whole } else { v };
    // Adding positive zero turns `-0.0` into `0.0`.
    let _ = write!(out, "{}", v + 0.0);
}

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// Appends `text` with the characters that are unsafe in attributes and text nodes escaped.
pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
