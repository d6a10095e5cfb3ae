//! Common utilities

use chrono::{Local, NaiveDateTime};

/// Check if a command is available in PATH
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Current local wall-clock time
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fixed-width `YYYYMMDDHHMMSS` stamp
pub fn compact_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Truncate string to at most `max_chars` characters
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_compact_timestamp_zero_padded() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(compact_timestamp(&at), "20240305070809");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("hi", 5), "hi");
    }

    #[test]
    fn test_truncate_chars_utf8() {
        let s = "你好世界";
        assert_eq!(truncate_chars(s, 2), "你好");
    }

    #[test]
    fn test_command_exists_missing() {
        assert!(!command_exists("definitely-not-a-real-command-xyz"));
    }
}
