//! Strikethrough (`~~text~~`).
//!
//! Rules:
//! - Exactly 2 tildes on each side
//! - The opener is not followed by whitespace, the closer not preceded by it
//! - Tildes inside raw spans never pair

use std::ops::Range;

/// Find strikethrough pairs outside `raw` (sorted, non-overlapping) spans.
/// Returns the outer range of each pair in order.
pub(crate) fn find_strikethrough(text: &str, raw: &[Range<usize>]) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut pairs = Vec::new();
    let mut opener: Option<usize> = None;
    let mut raw_spans = raw.iter().peekable();
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(span) = raw_spans.peek()
            && span.start <= pos
        {
            pos = pos.max(span.end);
            raw_spans.next();
            continue;
        }

        if bytes[pos] != b'~' {
            pos += 1;
            continue;
        }

        let run = bytes[pos..].iter().take_while(|&&b| b == b'~').count();
        if run == 2 {
            let before = text[..pos].chars().next_back();
            let after = text[pos + 2..].chars().next();
            let can_close = before.is_some_and(|c| !c.is_whitespace());
            let can_open = after.is_some_and(|c| !c.is_whitespace());

            match opener {
                Some(start) if can_close && start + 2 < pos => {
                    pairs.push(start..pos + 2);
                    opener = None;
                }
                None if can_open => opener = Some(pos),
                _ => {}
            }
        }
        pos += run;
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pair() {
        assert_eq!(find_strikethrough("a ~~b~~ c", &[]), vec![2..7]);
    }

    #[test]
    fn test_two_pairs() {
        assert_eq!(find_strikethrough("~~a~~ ~~b~~", &[]), vec![0..5, 6..11]);
    }

    #[test]
    fn test_rejects_single_and_triple_tildes() {
        assert!(find_strikethrough("~a~", &[]).is_empty());
        assert!(find_strikethrough("~~~a~~~", &[]).is_empty());
    }

    #[test]
    fn test_whitespace_inside_markers() {
        assert!(find_strikethrough("~~ a ~~", &[]).is_empty());
        assert!(find_strikethrough("~~~~", &[]).is_empty());
    }

    #[test]
    fn test_skips_raw_spans() {
        // `~~` inside a code span at 3..7
        assert!(find_strikethrough("~~a`~~`", &[3..7]).is_empty());
        assert_eq!(find_strikethrough("~~a`~~`~~", &[3..7]), vec![0..9]);
    }
}
