//! The delimiter stack.
//!
//! Emphasis runs (`*`, `_`) and link openers (`[`, `![`) are pushed as they are
//! scanned. Emphasis runs get their open/close potential once, from the
//! flanking rules:
//! - left-flanking: not followed by whitespace, and either not followed by
//!   punctuation or preceded by whitespace or punctuation
//! - right-flanking: the mirror image
//! - `*` opens when left-flanking and closes when right-flanking
//! - `_` additionally may not open after, or close before, an alphanumeric
//!
//! The start and end of the content count as whitespace.

/// What a stack entry was pushed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DelimiterKind {
    Star,
    Underscore,
    Bracket,
    ImageBracket,
}

impl DelimiterKind {
    pub(crate) fn is_bracket(self) -> bool {
        matches!(self, Self::Bracket | Self::ImageBracket)
    }
}

/// A delimiter in the delimiter stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Delimiter {
    pub kind: DelimiterKind,
    /// Byte range of the characters not yet consumed.
    pub start: usize,
    pub end: usize,
    /// Run length as scanned, for the rule of three.
    pub original_count: usize,
    pub can_open: bool,
    pub can_close: bool,
    pub active: bool,
}

impl Delimiter {
    pub(crate) fn emphasis(text: &str, start: usize, end: usize) -> Self {
        let kind = if text.as_bytes()[start] == b'_' {
            DelimiterKind::Underscore
        } else {
            DelimiterKind::Star
        };
        let (can_open, can_close) = analyze_delimiter_run(text, start, end, kind);
        Self {
            kind,
            start,
            end,
            original_count: end - start,
            can_open,
            can_close,
            active: true,
        }
    }

    pub(crate) fn bracket(kind: DelimiterKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            original_count: end - start,
            can_open: false,
            can_close: false,
            active: true,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.end - self.start
    }

    fn can_both(&self) -> bool {
        self.can_open && self.can_close
    }
}

/// A matched emphasis span
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EmphasisMatch {
    pub start: usize,         // byte position of opening delimiter
    pub end: usize,           // byte position after closing delimiter
    pub content_start: usize, // byte position of content start
    pub content_end: usize,   // byte position of content end
    pub level: u8,            // 1 = em, 2 = strong
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Determine if a delimiter run can open/close emphasis based on flanking rules.
fn analyze_delimiter_run(
    text: &str,
    run_start: usize,
    run_end: usize,
    kind: DelimiterKind,
) -> (bool, bool) {
    let char_before = text[..run_start].chars().next_back();
    let char_after = text[run_end..].chars().next();

    let followed_by_whitespace = char_after.is_none_or(is_whitespace);
    let followed_by_punctuation = char_after.is_some_and(is_punctuation);
    let preceded_by_whitespace = char_before.is_none_or(is_whitespace);
    let preceded_by_punctuation = char_before.is_some_and(is_punctuation);

    let left_flanking = !followed_by_whitespace
        && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);

    let right_flanking = !preceded_by_whitespace
        && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

    if kind == DelimiterKind::Underscore {
        let preceded_by_alnum = char_before.is_some_and(|c| c.is_alphanumeric());
        let followed_by_alnum = char_after.is_some_and(|c| c.is_alphanumeric());
        (
            left_flanking && !preceded_by_alnum,
            right_flanking && !followed_by_alnum,
        )
    } else {
        (left_flanking, right_flanking)
    }
}

/// Rule of three: when either side can both open and close, the original run
/// lengths may not sum to a multiple of 3 unless both are multiples of 3.
fn rule_of_three_excludes(opener: &Delimiter, closer: &Delimiter) -> bool {
    if !(opener.can_both() || closer.can_both()) {
        return false;
    }
    let sum = opener.original_count + closer.original_count;
    sum.is_multiple_of(3)
        && !(opener.original_count.is_multiple_of(3) && closer.original_count.is_multiple_of(3))
}

/// Resolve emphasis among `delimiters[bottom..]`.
///
/// Closers are visited left to right; each searches backward, no lower than
/// the floor for its character, for the nearest usable opener. Delimiters
/// between a matched pair are deactivated. Returns matches in the order found.
pub(crate) fn process_emphasis(delimiters: &mut [Delimiter], bottom: usize) -> Vec<EmphasisMatch> {
    let mut matches = Vec::new();
    let mut star_floor = bottom;
    let mut underscore_floor = bottom;

    let mut closer_idx = bottom;
    while closer_idx < delimiters.len() {
        let closer = &delimiters[closer_idx];
        if closer.kind.is_bracket() || !closer.active || !closer.can_close || closer.count() == 0 {
            closer_idx += 1;
            continue;
        }

        let floor = match closer.kind {
            DelimiterKind::Star => star_floor,
            _ => underscore_floor,
        };

        // Look backwards for a matching opener
        let mut skipped_by_rule_of_three = false;
        let mut opener_idx = None;
        for j in (floor..closer_idx).rev() {
            let opener = &delimiters[j];
            if opener.kind != closer.kind
                || !opener.active
                || !opener.can_open
                || opener.count() == 0
            {
                continue;
            }
            if rule_of_three_excludes(opener, closer) {
                skipped_by_rule_of_three = true;
                continue;
            }
            opener_idx = Some(j);
            break;
        }

        let Some(j) = opener_idx else {
            log::trace!("No opener for delimiter at {}", closer.start);
            // An opener passed over by the rule of three may still suit a later closer
            if !skipped_by_rule_of_three {
                match closer.kind {
                    DelimiterKind::Star => star_floor = closer_idx,
                    _ => underscore_floor = closer_idx,
                }
            }
            if !closer.can_open {
                delimiters[closer_idx].active = false;
            }
            closer_idx += 1;
            continue;
        };

        let opener_count = delimiters[j].count();
        let closer_count = delimiters[closer_idx].count();

        // Strong when both sides have two to spare; with odd runs of three or
        // more a single delimiter goes first so the strong pair ends outermost.
        let use_count = if opener_count >= 2 && closer_count >= 2 {
            if opener_count % 2 == 1 && closer_count % 2 == 1 {
                1
            } else {
                2
            }
        } else {
            1
        };

        // Opener gives up its last characters, closer its first.
        let em = EmphasisMatch {
            start: delimiters[j].end - use_count,
            end: delimiters[closer_idx].start + use_count,
            content_start: delimiters[j].end,
            content_end: delimiters[closer_idx].start,
            level: use_count as u8,
        };
        log::trace!(
            "Matched level {} emphasis at {}..{}",
            em.level,
            em.start,
            em.end
        );
        matches.push(em);

        delimiters[j].end -= use_count;
        delimiters[closer_idx].start += use_count;

        for delim in delimiters.iter_mut().take(closer_idx).skip(j + 1) {
            delim.active = false;
        }
        if delimiters[j].count() == 0 {
            delimiters[j].active = false;
        }
        if delimiters[closer_idx].count() == 0 {
            delimiters[closer_idx].active = false;
            closer_idx += 1;
        }
    }

    matches
}
