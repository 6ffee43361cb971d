//! List leaders and the list-building sub-algorithm.
//!
//! A list buffer is split into items and nested groups in one forward pass,
//! without backtracking. Nested groups are tokenized recursively as lists one
//! level deeper.

use super::code_blocks::try_parse_fence_open;
use super::utils::{leading_indent, strip_indent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListMarker {
    Bullet(char),
    Ordered {
        number: String,
        delimiter: ListDelimiter,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListDelimiter {
    Period,
    RightParen,
}

impl ListMarker {
    pub(crate) fn text(&self) -> String {
        match self {
            ListMarker::Bullet(c) => c.to_string(),
            ListMarker::Ordered { number, delimiter } => {
                let d = match delimiter {
                    ListDelimiter::Period => '.',
                    ListDelimiter::RightParen => ')',
                };
                format!("{number}{d}")
            }
        }
    }

    /// Bullet vs. ordered; the bullet character and delimiter don't matter.
    pub(crate) fn same_kind(&self, other: &ListMarker) -> bool {
        matches!(
            (self, other),
            (ListMarker::Bullet(_), ListMarker::Bullet(_))
                | (ListMarker::Ordered { .. }, ListMarker::Ordered { .. })
        )
    }
}

/// Parse a list leader after stripping leading whitespace.
/// Returns the marker and the item content following it.
pub(crate) fn try_parse_list_marker(line: &str) -> Option<(ListMarker, &str)> {
    let trimmed = line.trim_start();

    let (marker, rest) = match trimmed.chars().next()? {
        c @ ('-' | '+' | '*') => (ListMarker::Bullet(c), &trimmed[1..]),
        '0'..='9' => {
            let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits > 9 {
                return None;
            }
            let delimiter = match trimmed[digits..].chars().next()? {
                '.' => ListDelimiter::Period,
                ')' => ListDelimiter::RightParen,
                _ => return None,
            };
            (
                ListMarker::Ordered {
                    number: trimmed[..digits].to_string(),
                    delimiter,
                },
                &trimmed[digits + 1..],
            )
        }
        _ => return None,
    };

    // Leader must be followed by a space or end the line
    if rest.is_empty() {
        return Some((marker, rest));
    }
    rest.strip_prefix(' ').map(|content| (marker, content.trim_start()))
}

/// One item of a list: its leader and content lines, the first being the
/// text after the leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListItemDraft {
    pub marker: ListMarker,
    pub lines: Vec<String>,
}

impl ListItemDraft {
    /// Items with an interior blank line or a code fence hold blocks.
    /// Blank lines before the first text line don't count.
    pub(crate) fn has_blocks(&self) -> bool {
        let first_text = self.lines.iter().position(|l| !l.trim().is_empty());
        let last_text = self.lines.iter().rposition(|l| !l.trim().is_empty());
        let interior_blank = match (first_text, last_text) {
            (Some(first), Some(last)) => {
                self.lines[first..last].iter().any(|l| l.trim().is_empty())
            }
            _ => false,
        };
        interior_blank || self.lines.iter().any(|l| try_parse_fence_open(l).is_some())
    }

    /// Content lines without trailing blanks.
    pub(crate) fn content_lines(&self) -> &[String] {
        let end = self
            .lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        &self.lines[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListEntry {
    Item(ListItemDraft),
    /// Lines of a nested list with one level of indentation removed.
    Nested(Vec<String>),
}

/// Split a list buffer into items and nested groups.
///
/// * indent < 4 with a leader starts a new item
/// * indent >= 4 with a leader starts or continues a nested group
/// * indent >= 4 without a leader continues the open nested group, else the item
/// * indent < 4 without a leader is a lazy continuation of the same
///
/// With `allow_nested` off, lines that would start a nested group are folded
/// into the previous item as text.
pub(crate) fn split_items(lines: &[String], allow_nested: bool) -> Vec<ListEntry> {
    let mut entries: Vec<ListEntry> = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            match entries.last_mut() {
                Some(ListEntry::Nested(group)) => group.push(String::new()),
                Some(ListEntry::Item(item)) => item.lines.push(String::new()),
                None => {}
            }
            continue;
        }

        let indent = leading_indent(line);
        let leader = try_parse_list_marker(line);
        let has_leader = leader.is_some();

        if indent < 4
            && let Some((marker, content)) = &leader
        {
            entries.push(ListEntry::Item(ListItemDraft {
                marker: marker.clone(),
                lines: vec![content.to_string()],
            }));
            continue;
        }

        let nested_line = strip_indent(line, 4).to_string();
        let continuation = if indent >= 4 {
            nested_line.clone()
        } else {
            line.trim_start().to_string()
        };
        match entries.last_mut() {
            Some(ListEntry::Nested(group)) => group.push(continuation),
            _ if indent >= 4 && has_leader && allow_nested => {
                entries.push(ListEntry::Nested(vec![nested_line]));
            }
            Some(ListEntry::Item(item)) => item.lines.push(continuation),
            // Deep leader with no owning item
            None => match leader {
                Some((marker, content)) if !allow_nested => {
                    entries.push(ListEntry::Item(ListItemDraft {
                        marker,
                        lines: vec![content.to_string()],
                    }));
                }
                _ => entries.push(ListEntry::Nested(vec![nested_line])),
            },
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    fn item(marker: ListMarker, content: &[&str]) -> ListEntry {
        ListEntry::Item(ListItemDraft {
            marker,
            lines: lines(content),
        })
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(
            try_parse_list_marker("- item"),
            Some((ListMarker::Bullet('-'), "item"))
        );
        assert_eq!(
            try_parse_list_marker("  * item"),
            Some((ListMarker::Bullet('*'), "item"))
        );
        assert_eq!(try_parse_list_marker("+"), Some((ListMarker::Bullet('+'), "")));
        assert_eq!(try_parse_list_marker("-item"), None);
    }

    #[test]
    fn test_ordered_markers() {
        let (marker, content) = try_parse_list_marker("12. twelve").unwrap();
        assert_eq!(marker.text(), "12.");
        assert_eq!(content, "twelve");
        let (marker, _) = try_parse_list_marker("3) three").unwrap();
        assert_eq!(marker.text(), "3)");
        assert!(try_parse_list_marker("1234567890. too long").is_none());
        assert!(try_parse_list_marker("1.5 not a list").is_none());
    }

    #[test]
    fn test_split_nested_group() {
        let entries = split_items(&lines(&["- item 1", "    - nested", "- item 2"]), true);
        assert_eq!(
            entries,
            vec![
                item(ListMarker::Bullet('-'), &["item 1"]),
                ListEntry::Nested(lines(&["- nested"])),
                item(ListMarker::Bullet('-'), &["item 2"]),
            ]
        );
    }

    #[test]
    fn test_split_continuation_and_lazy() {
        let entries = split_items(&lines(&["- a", "    more", "lazy", "- b"]), true);
        assert_eq!(
            entries,
            vec![
                item(ListMarker::Bullet('-'), &["a", "more", "lazy"]),
                item(ListMarker::Bullet('-'), &["b"]),
            ]
        );
    }

    #[test]
    fn test_split_lazy_line_joins_nested_group() {
        let entries = split_items(&lines(&["- a", "    - b", "    c", "d"]), true);
        assert_eq!(
            entries,
            vec![
                item(ListMarker::Bullet('-'), &["a"]),
                ListEntry::Nested(lines(&["- b", "c", "d"])),
            ]
        );
    }

    #[test]
    fn test_split_without_nesting_folds_into_item() {
        let entries = split_items(&lines(&["- a", "    - b"]), false);
        assert_eq!(entries, vec![item(ListMarker::Bullet('-'), &["a", "- b"])]);
    }

    #[test]
    fn test_item_with_blank_line_has_blocks() {
        let draft = ListItemDraft {
            marker: ListMarker::Bullet('-'),
            lines: lines(&["a", "", "b", ""]),
        };
        assert!(draft.has_blocks());
        assert_eq!(draft.content_lines().len(), 3);

        let tight = ListItemDraft {
            marker: ListMarker::Bullet('-'),
            lines: lines(&["a", "b", ""]),
        };
        assert!(!tight.has_blocks());
    }
}
