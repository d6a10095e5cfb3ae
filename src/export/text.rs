//! Plain-text outputs: file save and clipboard copy

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::core::util::command_exists;

/// Clipboard helpers tried in order: program and its arguments
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Write `text` to `<dir>/<filename>.<extension>`
pub fn save_text(
    dir: &Path,
    filename: &str,
    extension: &str,
    text: &str,
) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{}.{}", filename, extension));
    std::fs::write(&path, text)?;
    debug!(path = %path.display(), bytes = text.len(), "saved text export");
    Ok(path)
}

/// First clipboard helper found in PATH
pub fn clipboard_command() -> Option<(&'static str, &'static [&'static str])> {
    CLIPBOARD_COMMANDS
        .iter()
        .copied()
        .find(|(program, _)| command_exists(program))
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // stdin is closed at the end of this block so the helper sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    // Always reap the child, even when the write failed
    let status = child.wait()?;
    written?;
    Ok(status.success())
}

/// Copy `text` to the system clipboard.
///
/// Never fails: problems are logged and reported as `false`.
pub fn copy_to_clipboard(text: &str) -> bool {
    let Some((program, args)) = clipboard_command() else {
        warn!(
            operation = "copy",
            "no clipboard helper found (pbcopy, wl-copy, xclip, xsel)"
        );
        return false;
    };
    copy_with(program, args, text)
}

/// Copy via a specific helper program
pub fn copy_with(program: &str, args: &[&str], text: &str) -> bool {
    match pipe_to(program, args, text) {
        Ok(true) => true,
        Ok(false) => {
            warn!(operation = "copy", program, "clipboard helper exited unsuccessfully");
            false
        }
        Err(err) => {
            warn!(operation = "copy", program, error = %err, "failed to copy to clipboard");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_text_appends_extension() {
        let temp = tempdir().unwrap();
        let name = "report_flow_1_x_20250101000000";
        let path = save_text(temp.path(), name, "md", "# hi").unwrap();
        assert_eq!(path.file_name().unwrap(), "report_flow_1_x_20250101000000.md");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi");
    }

    #[test]
    fn test_save_text_missing_dir_errors() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        assert!(save_text(&missing, "a", "txt", "x").is_err());
    }

    #[test]
    fn test_copy_with_missing_program_is_false() {
        assert!(!copy_with("definitely-not-a-clipboard-xyz", &[], "text"));
    }

    #[test]
    fn test_copy_with_failing_program_is_false() {
        assert!(!copy_with("false", &[], "text"));
    }

    #[test]
    fn test_pipe_to_reaps_helper_that_exits_early() {
        // `true` exits without reading, so a large write hits a closed pipe
        let text = "x".repeat(1 << 20);
        match pipe_to("true", &[], &text) {
            Ok(success) => assert!(success),
            Err(err) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
        }
    }

    #[test]
    fn test_pipe_to_success() {
        assert!(pipe_to("cat", &[], "hello").unwrap());
    }
}
