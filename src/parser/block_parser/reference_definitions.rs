//! Reference definitions: the document's footnote table.
//!
//! Reference definitions have the form:
//! ```markdown
//! [label]: url "optional title"
//! [label]: url 'optional title'
//! [label]: url (optional title)
//! [label]: <url> "title"
//! ```
//!
//! They produce no node; the block parser stores them in a
//! [`ReferenceRegistry`] that the inline parser and renderers consult.

use std::collections::HashMap;

use crate::parser::inline_parser::escapes::unescape;

/// A reference definition that maps a label to a URL and optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub label: String,
    pub url: String,
    pub title: Option<String>,
}

/// Registry that stores all reference definitions in a document.
/// Labels are stored in normalized form for case-insensitive lookup.
/// The first definition of a label wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRegistry {
    definitions: HashMap<String, ReferenceDefinition>,
    order: Vec<String>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference definition. Returns false when the label was already defined.
    pub fn add(&mut self, label: String, url: String, title: Option<String>) -> bool {
        let normalized_label = normalize_label(&label);
        if normalized_label.is_empty() || self.definitions.contains_key(&normalized_label) {
            return false;
        }
        self.order.push(normalized_label.clone());
        self.definitions
            .insert(normalized_label, ReferenceDefinition { label, url, title });
        true
    }

    /// Look up a reference definition by label (case-insensitive).
    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(&normalize_label(label))
    }

    /// Check if a label exists in the registry.
    pub fn contains(&self, label: &str) -> bool {
        self.definitions.contains_key(&normalize_label(label))
    }

    /// Definitions in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceDefinition> + '_ {
        self.order.iter().filter_map(|key| self.definitions.get(key))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Normalize a label for matching: case-folded, inner whitespace collapsed.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Try to parse a reference definition at the start of `text`.
/// Returns Some((length, label, url, title)) if successful.
///
/// Syntax:
/// ```markdown
/// [label]: url "title"
/// [label]: <url> 'title'
/// [label]: url
///          (title on next line)
/// ```
pub fn try_parse_reference_definition(
    text: &str,
) -> Option<(usize, String, String, Option<String>)> {
    let bytes = text.as_bytes();

    // Up to 3 spaces of indentation
    let mut pos = 0;
    while pos < bytes.len() && pos < 3 && bytes[pos] == b' ' {
        pos += 1;
    }

    if pos >= bytes.len() || bytes[pos] != b'[' {
        return None;
    }
    let label_start = pos + 1;
    pos += 1;

    // Find the closing ] for the label
    let mut escape_next = false;
    while pos < bytes.len() {
        if escape_next {
            escape_next = false;
            pos += 1;
            continue;
        }

        match bytes[pos] {
            b'\\' => {
                escape_next = true;
                pos += 1;
            }
            b']' => break,
            // Labels can't span lines or nest brackets
            b'\n' | b'[' => return None,
            _ => pos += 1,
        }
    }

    if pos >= bytes.len() || bytes[pos] != b']' {
        return None;
    }

    let label = &text[label_start..pos];
    if label.trim().is_empty() {
        return None;
    }

    pos += 1; // Skip ]

    // Must be followed by :
    if pos >= bytes.len() || bytes[pos] != b':' {
        return None;
    }
    pos += 1;

    // Skip whitespace
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }

    let url = if pos < bytes.len() && bytes[pos] == b'<' {
        // Angle-bracketed URL <url>
        pos += 1;
        let url_start = pos;
        while pos < bytes.len() && bytes[pos] != b'>' && bytes[pos] != b'\n' {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'>' {
            return None;
        }
        let url = &text[url_start..pos];
        pos += 1; // Skip >
        url
    } else {
        // Unbracketed URL (until whitespace or newline)
        let url_start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b' ' | b'\t' | b'\n') {
            pos += 1;
        }
        if url_start == pos {
            return None; // No URL found
        }
        &text[url_start..pos]
    };

    let title = parse_title(text, bytes, &mut pos)?;

    // Nothing else may follow on the line
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] != b'\n' {
        return None;
    }

    Some((
        pos,
        label.to_string(),
        unescape(url),
        title.map(|t| unescape(&t)),
    ))
}

/// Parse an optional title after the URL.
/// Titles can be in double quotes, single quotes, or parentheses.
/// Returns Some(Some(title)) if title found, Some(None) if no title, None if malformed.
fn parse_title(text: &str, bytes: &[u8], pos: &mut usize) -> Option<Option<String>> {
    let base_pos = *pos;

    // Skip whitespace (including one newline for a title on the next line)
    let mut newlines = 0;
    while *pos < bytes.len() && matches!(bytes[*pos], b' ' | b'\t' | b'\n') {
        if bytes[*pos] == b'\n' {
            newlines += 1;
        }
        *pos += 1;
    }

    if *pos >= bytes.len() || newlines > 1 {
        *pos = base_pos;
        return Some(None);
    }

    let quote_char = bytes[*pos];
    if !matches!(quote_char, b'"' | b'\'' | b'(') || *pos == base_pos {
        // No title, that's okay
        *pos = base_pos;
        return Some(None);
    }

    let closing_char = if quote_char == b'(' { b')' } else { quote_char };

    *pos += 1; // Skip opening quote
    let title_start = *pos;

    // Find closing quote
    let mut escape_next = false;
    while *pos < bytes.len() {
        if escape_next {
            escape_next = false;
            *pos += 1;
            continue;
        }

        match bytes[*pos] {
            b'\\' => {
                escape_next = true;
                *pos += 1;
            }
            c if c == closing_char => {
                let title = text[title_start..*pos].to_string();
                *pos += 1; // Skip closing quote
                return Some(Some(title));
            }
            _ => *pos += 1,
        }
    }

    if newlines == 1 {
        // Unclosed title on the next line: that line is not part of the definition
        *pos = base_pos;
        return Some(None);
    }

    // No closing quote found
    None
}

/// Remove reference definitions from the start of a buffer, storing them in
/// `registry`. Returns the number of lines consumed.
pub(crate) fn peel_reference_definitions(
    lines: &[String],
    registry: &mut ReferenceRegistry,
) -> usize {
    let mut consumed = 0;
    while consumed < lines.len() {
        let rest = lines[consumed..].join("\n");
        let Some((len, label, url, title)) = try_parse_reference_definition(&rest) else {
            break;
        };
        let used_lines = rest[..len].matches('\n').count() + 1;
        if registry.add(label.clone(), url, title) {
            log::debug!("Reference definition [{}]", label);
        } else {
            log::debug!("Duplicate reference definition [{}] ignored", label);
        }
        consumed += used_lines;
    }
    consumed
}
