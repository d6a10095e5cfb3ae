//! Export module - Render report Markdown into standalone HTML and PDF
//!
//! Pipeline: markdown → html → standalone document → pdf → save | blob.
//! Each stage only reads the previous stage's output and the live style
//! snapshot.

pub mod document;
pub mod error;
pub mod html;
pub mod pdf;
pub mod style;
pub mod text;

use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::export::document::standalone_document;
use crate::export::error::ExportError;
use crate::export::html::render_html;
use crate::export::pdf::{PageLayout, Rasterizer};
use crate::export::style::{export_stylesheet, StyleSnapshotProvider};

/// What to do with the rasterized document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Write `<filename>.pdf` into the output directory
    #[default]
    Save,
    /// Hand the bytes back to the caller
    Blob,
}

impl std::str::FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "save" => Ok(ExportMode::Save),
            "blob" => Ok(ExportMode::Blob),
            _ => Err(format!("Unknown export mode: {}", s)),
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Blob(Vec<u8>),
}

/// Export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub layout: PageLayout,
    /// Directory used by [`ExportMode::Save`]
    pub out_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            layout: PageLayout::default(),
            out_dir: PathBuf::from("."),
        }
    }
}

/// Log a stage failure with its operation name and wrap it
fn stage_failed(operation: &'static str, err: ExportError) -> ExportError {
    error!(operation, error = %err, "export stage failed");
    match err {
        ExportError::Failed { .. } => err,
        other => ExportError::failed(operation, other),
    }
}

/// Markdown → HTML → standalone document with host styles, print
/// overrides and the layout's page-break rules
pub fn render_document(
    markdown: &str,
    styles: &dyn StyleSnapshotProvider,
    layout: &PageLayout,
) -> String {
    let body = render_html(markdown);
    let mut css = export_stylesheet(styles);
    css.push_str(&layout.break_css());
    standalone_document(&body, &css)
}

/// Markdown to PDF exporter.
///
/// Holds no mutable state, but the style snapshot is read live on every
/// call, so callers should not run two exports against changing styles at
/// once.
pub struct Exporter<'a> {
    styles: &'a dyn StyleSnapshotProvider,
    rasterizer: &'a dyn Rasterizer,
    config: ExportConfig,
}

impl<'a> Exporter<'a> {
    pub fn new(
        styles: &'a dyn StyleSnapshotProvider,
        rasterizer: &'a dyn Rasterizer,
        config: ExportConfig,
    ) -> Self {
        Self {
            styles,
            rasterizer,
            config,
        }
    }

    /// Build the standalone, print-ready HTML document for `markdown`
    pub fn render_document(&self, markdown: &str) -> String {
        render_document(markdown, self.styles, &self.config.layout)
    }

    /// Run the full pipeline.
    ///
    /// `Save` requires `filename` (no extension); `.pdf` is appended.
    pub fn export(
        &self,
        markdown: &str,
        mode: ExportMode,
        filename: Option<&str>,
    ) -> Result<ExportOutcome, ExportError> {
        let target = match (mode, filename) {
            (ExportMode::Save, None) => {
                return Err(stage_failed("save", ExportError::MissingFilename))
            }
            (ExportMode::Save, Some(name)) => Some(self.pdf_path(name)),
            (ExportMode::Blob, _) => None,
        };

        let document = self.render_document(markdown);

        let bytes = self
            .rasterizer
            .rasterize(&document, &self.config.layout)
            .map_err(|e| stage_failed("rasterize", e))?;

        match target {
            Some(path) => {
                if bytes.is_empty() {
                    return Err(stage_failed("save", ExportError::EmptyArtifact));
                }
                std::fs::write(&path, &bytes)
                    .map_err(|e| stage_failed("save", ExportError::io_error(&path, e)))?;
                info!(path = %path.display(), bytes = bytes.len(), "saved pdf export");
                Ok(ExportOutcome::Saved(path))
            }
            None => {
                if bytes.is_empty() {
                    return Err(stage_failed("blob", ExportError::EmptyArtifact));
                }
                Ok(ExportOutcome::Blob(bytes))
            }
        }
    }

    fn pdf_path(&self, filename: &str) -> PathBuf {
        Path::new(&self.config.out_dir).join(format!("{}.pdf", filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::style::StaticStyles;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Records the document it was given and returns fixed bytes
    struct StubRasterizer {
        bytes: Vec<u8>,
        seen: RefCell<Option<String>>,
    }

    impl StubRasterizer {
        fn returning(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                seen: RefCell::new(None),
            }
        }
    }

    impl Rasterizer for StubRasterizer {
        fn rasterize(
            &self,
            document: &str,
            _layout: &PageLayout,
        ) -> Result<Vec<u8>, ExportError> {
            *self.seen.borrow_mut() = Some(document.to_string());
            Ok(self.bytes.clone())
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(
            &self,
            _document: &str,
            _layout: &PageLayout,
        ) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::RasterizerFailed {
                status: "exit status: 1".to_string(),
                stderr: "boom".to_string(),
            })
        }
    }

    fn config(out_dir: &Path) -> ExportConfig {
        ExportConfig {
            out_dir: out_dir.to_path_buf(),
            ..ExportConfig::default()
        }
    }

    #[test]
    fn test_export_blob_returns_bytes() {
        let styles = StaticStyles(".host{}".to_string());
        let raster = StubRasterizer::returning(b"%PDF-1.4");
        let exporter = Exporter::new(&styles, &raster, ExportConfig::default());

        let outcome = exporter.export("# Title", ExportMode::Blob, None).unwrap();
        assert_eq!(outcome, ExportOutcome::Blob(b"%PDF-1.4".to_vec()));

        let doc = raster.seen.borrow().clone().unwrap();
        assert!(doc.contains(".host{}"));
        assert!(doc.contains("!important"));
        assert!(doc.contains("<h1 id=\"title\">Title</h1>"));
    }

    #[test]
    fn test_export_save_writes_pdf() {
        let temp = tempdir().unwrap();
        let styles = StaticStyles::default();
        let raster = StubRasterizer::returning(b"%PDF");
        let exporter = Exporter::new(&styles, &raster, config(temp.path()));

        let outcome = exporter
            .export("text", ExportMode::Save, Some("report_flow_1_a_20250101000000"))
            .unwrap();
        let path = temp.path().join("report_flow_1_a_20250101000000.pdf");
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }

    #[test]
    fn test_export_save_requires_filename() {
        let styles = StaticStyles::default();
        let raster = StubRasterizer::returning(b"%PDF");
        let exporter = Exporter::new(&styles, &raster, ExportConfig::default());

        let err = exporter.export("text", ExportMode::Save, None).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Failed {
                operation: "save",
                ..
            }
        ));
        // Nothing was rasterized
        assert!(raster.seen.borrow().is_none());
    }

    #[test]
    fn test_export_blob_empty_is_error() {
        let styles = StaticStyles::default();
        let raster = StubRasterizer::returning(b"");
        let exporter = Exporter::new(&styles, &raster, ExportConfig::default());

        let err = exporter.export("text", ExportMode::Blob, None).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Failed {
                operation: "blob",
                ..
            }
        ));
        assert!(err.to_string().contains("export failed during blob"));
    }

    #[test]
    fn test_export_save_empty_is_error() {
        let temp = tempdir().unwrap();
        let styles = StaticStyles::default();
        let raster = StubRasterizer::returning(b"");
        let exporter = Exporter::new(&styles, &raster, config(temp.path()));

        let err = exporter
            .export("text", ExportMode::Save, Some("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Failed {
                operation: "save",
                ..
            }
        ));
        assert!(!temp.path().join("out.pdf").exists());
    }

    #[test]
    fn test_export_rasterize_failure_is_wrapped() {
        let temp = tempdir().unwrap();
        let styles = StaticStyles::default();
        let exporter = Exporter::new(&styles, &FailingRasterizer, config(temp.path()));

        let err = exporter
            .export("text", ExportMode::Save, Some("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Failed {
                operation: "rasterize",
                ..
            }
        ));
        assert!(err.to_string().contains("boom"));
        assert!(!temp.path().join("out.pdf").exists());
    }

    #[test]
    fn test_render_document_includes_break_rules() {
        let styles = StaticStyles::default();
        let raster = StubRasterizer::returning(b"x");
        let exporter = Exporter::new(&styles, &raster, ExportConfig::default());
        let doc = exporter.render_document("hello");
        assert!(doc.contains(".page-break {"));
        assert!(doc.contains("data-theme=\"light\""));
    }

    #[test]
    fn test_page_break_markers_reach_document() {
        let styles = StaticStyles::default();
        let layout = PageLayout::default();
        let markdown = "first\n\n<div class=\"page-break\"></div>\n\n\
<div class=\"page-break-before\"></div>\n\nsecond";
        let doc = render_document(markdown, &styles, &layout);

        assert!(doc.contains("<div class=\"page-break\"></div>"));
        assert!(doc.contains("<div class=\"page-break-before\"></div>"));
        let rule = doc.find(".page-break {").unwrap();
        let marker = doc.find("<div class=\"page-break\">").unwrap();
        assert!(rule < marker);
    }

    #[test]
    fn test_export_mode_parse() {
        assert_eq!("save".parse::<ExportMode>().unwrap(), ExportMode::Save);
        assert_eq!("BLOB".parse::<ExportMode>().unwrap(), ExportMode::Blob);
        assert!("png".parse::<ExportMode>().is_err());
    }
}
