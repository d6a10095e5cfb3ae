//! Export file naming
//!
//! `report_flow_<id>_<title>_<YYYYMMDDHHMMSS>`, with no extension. Two
//! exports of the same flow within one second get the same name.

use chrono::NaiveDateTime;

use crate::core::model::Flow;
use crate::core::util::{compact_timestamp, local_now, truncate_chars};

/// Maximum length of the sanitized title part
pub const MAX_TITLE_CHARS: usize = 150;

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn replace_unsafe(value: &str) -> String {
    value
        .chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .collect()
}

/// Filesystem-safe, lower-case form of a flow title
pub fn sanitize_title(title: &str) -> String {
    let replaced = replace_unsafe(title).to_lowercase();
    truncate_chars(&replaced, MAX_TITLE_CHARS)
        .trim_end_matches('_')
        .to_string()
}

/// Report base name for a flow exported at `at`
pub fn report_filename_at(id: &str, title: &str, at: &NaiveDateTime) -> String {
    format!(
        "report_flow_{}_{}_{}",
        replace_unsafe(id),
        sanitize_title(title),
        compact_timestamp(at)
    )
}

/// Report base name for `flow`, stamped with the current local time
pub fn report_filename(flow: &Flow) -> String {
    report_filename_at(flow.id.as_str(), &flow.title, &local_now())
}
