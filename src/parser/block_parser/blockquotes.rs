//! Blockquote parsing utilities.

/// Check if line starts with a blockquote marker (up to 3 spaces + >).
/// Returns (marker_end_byte, content_start_byte) if found.
pub(crate) fn try_parse_blockquote_marker(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut i = 0;

    // Skip up to 3 spaces
    let mut spaces = 0;
    while i < bytes.len() && bytes[i] == b' ' && spaces < 3 {
        spaces += 1;
        i += 1;
    }

    // Must have > next
    if i >= bytes.len() || bytes[i] != b'>' {
        return None;
    }
    let marker_end = i + 1;

    // Optional space after >
    let content_start = if marker_end < bytes.len() && bytes[marker_end] == b' ' {
        marker_end + 1
    } else {
        marker_end
    };

    Some((marker_end, content_start))
}

/// Strip one level of quoting from every line. Lazy lines (no marker) pass through.
pub(crate) fn strip_quote_markers(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| match try_parse_blockquote_marker(line) {
            Some((_, content_start)) => line[content_start..].to_string(),
            None => line.clone(),
        })
        .collect()
}
