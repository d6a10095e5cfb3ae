//! Style snapshot capture
//!
//! The exported document embeds the host's stylesheets followed by a fixed
//! block of print overrides. Reading the host styles sits behind
//! [`StyleSnapshotProvider`] so the pipeline can run against a stub.

use std::path::PathBuf;
use tracing::{debug, warn};

/// Rules appended after the host styles so the export is always light and
/// printable regardless of the active theme.
pub const PRINT_OVERRIDES: &str = r#"
html, body {
  background: #ffffff !important;
  color: #1f2937 !important;
}
body {
  padding: 20px;
  line-height: 1.6;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
}
.markdown-body {
  background: #ffffff !important;
  color: #1f2937 !important;
}
pre, code {
  background: #f6f8fa !important;
  color: #24292f !important;
  border-radius: 4px;
}
pre {
  padding: 12px;
  overflow-x: auto;
  white-space: pre-wrap;
  word-wrap: break-word;
}
h1, h2, h3, h4, h5, h6 {
  page-break-after: avoid;
  break-after: avoid;
  page-break-inside: avoid;
  break-inside: avoid;
}
pre, blockquote, table, tr {
  page-break-inside: avoid;
  break-inside: avoid;
}
"#;

/// Source of the host's active stylesheet rules
pub trait StyleSnapshotProvider {
    /// Concatenated CSS of every readable stylesheet.
    ///
    /// Sheets that cannot be read contribute nothing; this never fails.
    fn snapshot(&self) -> String;
}

/// Fixed CSS
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticStyles(pub String);

#[cfg(test)]
impl StyleSnapshotProvider for StaticStyles {
    fn snapshot(&self) -> String {
        self.0.clone()
    }
}

/// Stylesheets read from disk at snapshot time
#[derive(Debug, Clone, Default)]
pub struct StylesheetFiles {
    paths: Vec<PathBuf>,
}

impl StylesheetFiles {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }
}

impl StyleSnapshotProvider for StylesheetFiles {
    fn snapshot(&self) -> String {
        let mut css = String::new();
        for path in &self.paths {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    debug!(path = %path.display(), bytes = content.len(), "captured stylesheet");
                    css.push_str(&content);
                    if !content.ends_with('\n') {
                        css.push('\n');
                    }
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable stylesheet");
                }
            }
        }
        css
    }
}

/// Host styles followed by the print overrides
pub fn export_stylesheet(provider: &dyn StyleSnapshotProvider) -> String {
    let mut css = provider.snapshot();
    css.push_str(PRINT_OVERRIDES);
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_static_styles_snapshot() {
        let styles = StaticStyles("body{color:red}".to_string());
        assert_eq!(styles.snapshot(), "body{color:red}");
    }

    #[test]
    fn test_stylesheet_files_concatenates_in_order() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.css");
        let b = temp.path().join("b.css");
        fs::write(&a, ".a{}").unwrap();
        fs::write(&b, ".b{}\n").unwrap();

        let styles = StylesheetFiles::new([a, b]);
        assert_eq!(styles.snapshot(), ".a{}\n.b{}\n");
    }

    #[test]
    fn test_stylesheet_files_skips_unreadable() {
        let temp = tempdir().unwrap();
        let good = temp.path().join("good.css");
        fs::write(&good, ".good{}").unwrap();

        let styles = StylesheetFiles::new([temp.path().join("missing.css"), good]);
        assert_eq!(styles.snapshot(), ".good{}\n");
    }

    #[test]
    fn test_export_stylesheet_overrides_last() {
        let css = export_stylesheet(&StaticStyles("body{background:#000}".to_string()));
        let host = css.find("background:#000").unwrap();
        let forced = css.find("background: #ffffff !important").unwrap();
        assert!(host < forced);
        assert!(css.contains("pre, blockquote, table, tr"));
    }
}
