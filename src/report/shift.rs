//! Header level shifting for embedded Markdown
//!
//! Task inputs are authored as standalone documents. Before they are nested
//! under a level-3 task heading their ATX headings are pushed down so they
//! cannot outrank the report's own structure.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shift applied to task `input` bodies
pub const INPUT_HEADER_SHIFT: usize = 3;

/// Deepest ATX heading level
pub const MAX_HEADING_LEVEL: usize = 6;

/// Line-start ATX heading: `#`..`######` then whitespace or end of line
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})([ \t].*|)$").expect("Invalid HEADING_RE regex"));

/// Opening/closing code fence (up to three spaces of indent)
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("Invalid FENCE_RE regex"));

/// Open fence marker: fence character and run length
#[derive(Debug, Clone, Copy)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    fn parse(line: &str) -> Option<Self> {
        let marker = FENCE_RE.captures(line)?.get(1)?.as_str();
        let ch = marker.chars().next()?;
        Some(Fence {
            ch,
            len: marker.len(),
        })
    }

    fn closes(&self, other: &Fence, line: &str) -> bool {
        // A closing fence carries no info string
        other.ch == self.ch
            && other.len >= self.len
            && line.trim_start().trim_start_matches(self.ch).trim().is_empty()
    }
}

/// Raise every ATX heading in `markdown` by `shift` levels, capped at 6.
///
/// Lines inside fenced code blocks are left alone.
pub fn shift_headers(markdown: &str, shift: usize) -> String {
    if shift == 0 {
        return markdown.to_string();
    }

    let mut open_fence: Option<Fence> = None;
    let mut out: Vec<String> = Vec::new();

    // split('\n') keeps '\r' on CRLF lines, so line endings survive the rejoin
    for line in markdown.split('\n') {
        let body = line.strip_suffix('\r').unwrap_or(line);

        if let Some(fence) = Fence::parse(body) {
            match open_fence {
                Some(open) if open.closes(&fence, body) => open_fence = None,
                Some(_) => {}
                None => open_fence = Some(fence),
            }
            out.push(line.to_string());
            continue;
        }

        if open_fence.is_some() {
            out.push(line.to_string());
            continue;
        }

        match HEADING_RE.captures(body) {
            Some(caps) => {
                let level = caps[1].len();
                let new_level = (level + shift).min(MAX_HEADING_LEVEL);
                let rest = &line[level..];
                out.push(format!("{}{}", "#".repeat(new_level), rest));
            }
            None => out.push(line.to_string()),
        }
    }

    out.join("\n")
}
