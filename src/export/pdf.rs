//! Paginated PDF rasterization
//!
//! The document is laid out on A4 portrait pages with 5 mm margins at 2x
//! pixel density. Page breaks follow the modes in [`PageLayout::breaks`] in
//! priority order. The default backend shells out to `wkhtmltopdf`.

use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::core::util::command_exists;
use crate::export::error::ExportError;

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// Page break strategy, applied in the order listed in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBreakMode {
    /// Never split atomic blocks across pages
    AvoidAll,
    /// Honor `page-break-*` / `break-*` hints in the stylesheet
    Css,
    /// Explicit `.page-break` marker elements
    Legacy,
}

impl PageBreakMode {
    /// Rules this mode contributes to the export stylesheet
    pub fn css(self) -> &'static str {
        match self {
            PageBreakMode::AvoidAll => {
                "img, svg, pre, blockquote, table, tr, li, h1, h2, h3, h4, h5, h6 \
{ page-break-inside: avoid; break-inside: avoid; }\n"
            }
            PageBreakMode::Css => {
                ".page-break-before { page-break-before: always; break-before: page; }\n\
.page-break-after { page-break-after: always; break-after: page; }\n"
            }
            PageBreakMode::Legacy => ".page-break { page-break-before: always; height: 0; }\n",
        }
    }
}

/// Page geometry and break policy for rasterization
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: f32,
    /// Pixel density multiplier
    pub scale: f32,
    pub breaks: Vec<PageBreakMode>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 5.0,
            scale: 2.0,
            breaks: vec![
                PageBreakMode::AvoidAll,
                PageBreakMode::Css,
                PageBreakMode::Legacy,
            ],
        }
    }
}

impl PageLayout {
    /// Concatenated CSS of every break mode, in priority order
    pub fn break_css(&self) -> String {
        self.breaks.iter().map(|mode| mode.css()).collect()
    }

    /// Rendering DPI for the configured density
    pub fn dpi(&self) -> u32 {
        (96.0 * self.scale).round() as u32
    }
}

/// Turns a standalone HTML document into PDF bytes
pub trait Rasterizer {
    fn rasterize(&self, document: &str, layout: &PageLayout) -> Result<Vec<u8>, ExportError>;
}

/// `wkhtmltopdf` backend
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
}

impl Default for Wkhtmltopdf {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl Wkhtmltopdf {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the configured program can be found
    pub fn is_available(&self) -> bool {
        self.program.is_file() || command_exists(&self.program.to_string_lossy())
    }

    /// Command-line arguments for `layout`, without the input/output paths
    pub fn layout_args(layout: &PageLayout) -> Vec<String> {
        let margin = format!("{}mm", layout.margin_mm);
        let mut args = vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--page-size".to_string(),
            layout.size.as_str().to_string(),
            "--orientation".to_string(),
            layout.orientation.as_str().to_string(),
            "--dpi".to_string(),
            layout.dpi().to_string(),
        ];
        for side in ["top", "right", "bottom", "left"] {
            args.push(format!("--margin-{}", side));
            args.push(margin.clone());
        }
        args
    }
}

impl Rasterizer for Wkhtmltopdf {
    fn rasterize(&self, document: &str, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
        if !self.is_available() {
            return Err(ExportError::RasterizerUnavailable(format!(
                "{} is not installed. Please install it: https://wkhtmltopdf.org/downloads.html",
                self.program.display()
            )));
        }

        // Removed on drop, on every exit path
        let workdir = tempfile::tempdir()
            .map_err(|e| ExportError::io_error(std::env::temp_dir(), e))?;
        let input = workdir.path().join("report.html");
        let output = workdir.path().join("report.pdf");

        std::fs::write(&input, document).map_err(|e| ExportError::io_error(&input, e))?;

        let result = Command::new(&self.program)
            .args(Self::layout_args(layout))
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|e| ExportError::io_error(&self.program, e))?;

        if !result.status.success() {
            return Err(ExportError::RasterizerFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let bytes = std::fs::read(&output).map_err(|e| ExportError::io_error(&output, e))?;
        debug!(bytes = bytes.len(), "rasterized document");
        Ok(bytes)
    }
}
