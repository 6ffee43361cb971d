//! Line normalization run before block tokenizing.
//!
//! After normalization a line is blank iff it is empty. Whitespace-only lines
//! inside a fenced code block carry one extra space so they never flush the
//! block buffer; code emission removes that space again.

use super::block_parser::code_blocks::{FenceInfo, is_closing_fence, try_parse_fence_open};
use super::block_parser::headings::try_parse_atx_heading;
use super::block_parser::utils::strip_newline;

/// Padding appended to whitespace-only lines inside an open fence.
pub(crate) const FENCED_BLANK_PAD: char = ' ';

/// Normalizes a raw line stream.
///
/// * trailing `\n` / `\r\n` removed
/// * tabs expanded to four spaces
/// * whitespace-only lines outside fences emptied
/// * a blank line inserted before and after every fence and after every ATX heading
/// * a trailing blank line appended
///
/// With `fences` off, fence lines are ordinary text.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S], fences: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 2);
    let mut open_fence: Option<FenceInfo> = None;

    for raw in lines {
        let line = strip_newline(raw.as_ref()).0.replace('\t', "    ");

        if let Some(fence) = &open_fence {
            if is_closing_fence(&line, fence) {
                out.push(line);
                out.push(String::new());
                open_fence = None;
            } else if line.trim().is_empty() {
                let mut padded = line;
                padded.push(FENCED_BLANK_PAD);
                out.push(padded);
            } else {
                out.push(line);
            }
            continue;
        }

        if line.trim().is_empty() {
            push_blank(&mut out);
            continue;
        }

        if let Some(fence) = try_parse_fence_open(&line).filter(|_| fences) {
            push_blank(&mut out);
            out.push(line);
            open_fence = Some(fence);
            continue;
        }

        let is_atx = try_parse_atx_heading(&line).is_some();
        out.push(line);
        if is_atx {
            out.push(String::new());
        }
    }

    push_blank(&mut out);
    out
}

fn push_blank(out: &mut Vec<String>) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
}
