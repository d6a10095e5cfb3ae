//! Renderer module
//!
//! Renders a compiled report to the CLI output formats: md, html, json

use serde::Serialize;
use std::io::Write;

use crate::export::pdf::PageLayout;
use crate::export::render_document;
use crate::export::style::StyleSnapshotProvider;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Json,
}

impl OutputFormat {
    /// File extension used when the output is saved
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// A compiled report ready for output
#[derive(Debug, Clone, Serialize)]
pub struct CompiledReport {
    /// Base file name for saved artifacts, when a flow was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub markdown: String,
}

/// Renderer for compiled reports
pub struct Renderer<'a> {
    config: RenderConfig,
    styles: &'a dyn StyleSnapshotProvider,
    layout: &'a PageLayout,
}

impl<'a> Renderer<'a> {
    pub fn new(
        config: RenderConfig,
        styles: &'a dyn StyleSnapshotProvider,
        layout: &'a PageLayout,
    ) -> Self {
        Self {
            config,
            styles,
            layout,
        }
    }

    /// Render a report to a string
    pub fn render(&self, report: &CompiledReport) -> String {
        match self.config.format {
            OutputFormat::Markdown => report.markdown.clone(),
            OutputFormat::Html => {
                render_document(&report.markdown, self.styles, self.layout)
            }
            OutputFormat::Json => self.render_json(report),
        }
    }

    /// Render to a writer, newline-terminated
    pub fn render_to<W: Write>(
        &self,
        report: &CompiledReport,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(report);
        writer.write_all(output.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    fn render_json(&self, report: &CompiledReport) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
