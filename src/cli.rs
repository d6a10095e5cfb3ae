//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::model::FlowReport;
use crate::core::render::{CompiledReport, OutputFormat, RenderConfig, Renderer};
use crate::export::pdf::{Orientation, PageLayout, PageSize, Wkhtmltopdf};
use crate::export::style::StylesheetFiles;
use crate::export::text::{copy_to_clipboard, save_text};
use crate::export::{ExportConfig, ExportMode, ExportOutcome, Exporter};
use crate::report::compile::compile;
use crate::report::filename::report_filename;

/// flowreport - compile automation flow records into Markdown, HTML and PDF reports.
#[derive(Parser, Debug)]
#[command(name = "flowreport")]
#[command(
    author,
    version,
    about,
    long_about = r#"flowreport reads a flow record (a flow with its tasks and subtasks, as JSON)
and compiles it into a single Markdown report with a table of contents.

The report can be printed, saved, rendered to a standalone HTML document,
exported to PDF, or copied to the clipboard.

Input JSON:
    { "flow": { "id": 7, "title": "Recon", "status": "running" },
      "tasks": [ { "id": 1, "title": "...", "status": "finished",
                   "input": "...", "result": "...", "subtasks": [...] } ] }

Examples:
    flowreport --input flow.json compile
    flowreport --input flow.json compile --format html --save
    flowreport --input flow.json export --stylesheet theme.css
    flowreport --input flow.json filename
"#
)]
pub struct Cli {
    /// Flow record JSON file.
    #[arg(
        long,
        global = true,
        env = "FLOWREPORT_INPUT",
        default_value = "flow.json",
        value_name = "FILE",
        long_help = "Flow record JSON file.\n\n\
Either an object with optional \"flow\" and \"tasks\" fields, or a bare array of tasks.\n\
Task and subtask ids may be numbers or numeric strings; they are ordered numerically."
    )]
    pub input: PathBuf,

    /// Directory where saved artifacts are written.
    #[arg(
        long,
        global = true,
        env = "FLOWREPORT_OUT_DIR",
        default_value = ".",
        value_name = "DIR"
    )]
    pub out_dir: PathBuf,

    /// Stylesheets embedded into HTML/PDF output (repeatable).
    #[arg(
        long = "stylesheet",
        global = true,
        value_name = "CSS",
        long_help = "CSS files embedded into the exported HTML/PDF document, in order.\n\n\
Unreadable files are skipped with a warning. Print overrides (light background,\n\
page-break rules) are always appended after them."
    )]
    pub stylesheets: Vec<PathBuf>,

    /// Disable colored output (when applicable).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the flow into its Markdown report.
    #[command(
        long_about = "Compile the flow into the canonical Markdown report: flow title, table of\n\
contents, then one section per task in ascending id order.\n\n\
Examples:\n\
  flowreport compile\n\
  flowreport compile --format html --save\n\
  flowreport compile --format json --pretty\n"
    )]
    Compile {
        /// Output format (md/html/json).
        #[arg(
            long,
            default_value = "md",
            value_name = "FORMAT",
            long_help = "Select the output format.\n\n\
Supported values:\n\
- md (default): the Markdown report\n\
- html: standalone, print-styled HTML document\n\
- json: {\"filename\", \"markdown\"}"
        )]
        format: String,

        /// Save to OUT_DIR/<report name>.<ext> instead of printing.
        #[arg(long)]
        save: bool,
    },

    /// Export the report as a paginated PDF.
    #[command(
        long_about = "Render the report to HTML, embed the stylesheets and print overrides, and\n\
rasterize it to PDF with wkhtmltopdf.\n\n\
Examples:\n\
  flowreport export\n\
  flowreport export --mode blob > report.pdf\n\
  flowreport export --stylesheet app.css --page-size letter\n"
    )]
    Export {
        /// Output mode (save/blob).
        #[arg(
            long,
            default_value = "save",
            value_name = "MODE",
            long_help = "Select what happens to the PDF.\n\n\
Supported values:\n\
- save (default): write OUT_DIR/<report name>.pdf\n\
- blob: write the PDF bytes to stdout"
        )]
        mode: String,

        /// Path to the wkhtmltopdf binary.
        #[arg(
            long,
            env = "FLOWREPORT_WKHTMLTOPDF",
            default_value = "wkhtmltopdf",
            value_name = "PATH"
        )]
        wkhtmltopdf: String,

        /// Paper size (a4/letter).
        #[arg(long, default_value = "a4", value_name = "SIZE")]
        page_size: String,

        /// Landscape orientation instead of portrait.
        #[arg(long)]
        landscape: bool,

        /// Page margin on every side, in millimetres.
        #[arg(long, default_value = "5", value_name = "MM")]
        margin_mm: f32,

        /// Pixel density multiplier.
        #[arg(long, default_value = "2", value_name = "N")]
        scale: f32,
    },

    /// Print the generated report file name (no extension).
    Filename,

    /// Copy the Markdown report to the clipboard.
    Copy,

    /// Check external dependencies.
    #[command(
        long_about = "Check whether the external tools used by export/copy are installed\n\
(wkhtmltopdf, a clipboard helper).\n\n\
Example:\n\
  flowreport doctor\n"
    )]
    Doctor {
        /// Path to the wkhtmltopdf binary.
        #[arg(
            long,
            env = "FLOWREPORT_WKHTMLTOPDF",
            default_value = "wkhtmltopdf",
            value_name = "PATH"
        )]
        wkhtmltopdf: String,
    },
}

/// Load the input and compile it
fn load_report(input: &Path) -> Result<CompiledReport> {
    let flow_report = FlowReport::from_path(input)?;
    let markdown = compile(&flow_report.tasks, flow_report.flow.as_ref());
    let filename = flow_report.flow.as_ref().map(report_filename);
    debug!(
        tasks = flow_report.tasks.len(),
        bytes = markdown.len(),
        "compiled report"
    );
    Ok(CompiledReport { filename, markdown })
}

fn require_filename(report: &CompiledReport) -> Result<&str> {
    match report.filename.as_deref() {
        Some(name) => Ok(name),
        None => bail!("The input has no \"flow\" record; a file name cannot be generated"),
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let styles = StylesheetFiles::new(cli.stylesheets.clone());

    match cli.command {
        Commands::Compile { format, save } => {
            let format: OutputFormat = format.parse().unwrap_or_default();
            let report = load_report(&cli.input)?;
            let layout = PageLayout::default();
            let renderer = Renderer::new(
                RenderConfig::with_pretty(format, cli.pretty),
                &styles,
                &layout,
            );

            if save {
                let name = require_filename(&report)?;
                let rendered = renderer.render(&report);
                let path = save_text(&cli.out_dir, name, format.extension(), &rendered)
                    .with_context(|| format!("Failed to save report to {:?}", cli.out_dir))?;
                info!(path = %path.display(), "saved report");
                println!("{}", path.display());
            } else {
                renderer.render_to(&report, std::io::stdout().lock())?;
            }
            Ok(())
        }

        Commands::Export {
            mode,
            wkhtmltopdf,
            page_size,
            landscape,
            margin_mm,
            scale,
        } => {
            let mode: ExportMode = mode.parse().map_err(anyhow::Error::msg)?;
            let size: PageSize = page_size.parse().map_err(anyhow::Error::msg)?;
            let report = load_report(&cli.input)?;

            let config = ExportConfig {
                layout: PageLayout {
                    size,
                    orientation: if landscape {
                        Orientation::Landscape
                    } else {
                        Orientation::Portrait
                    },
                    margin_mm,
                    scale,
                    ..PageLayout::default()
                },
                out_dir: cli.out_dir.clone(),
            };
            let rasterizer = Wkhtmltopdf::new(wkhtmltopdf);
            let exporter = Exporter::new(&styles, &rasterizer, config);

            let filename = match mode {
                ExportMode::Save => Some(require_filename(&report)?),
                ExportMode::Blob => report.filename.as_deref(),
            };

            match exporter.export(&report.markdown, mode, filename)? {
                ExportOutcome::Saved(path) => println!("{}", path.display()),
                ExportOutcome::Blob(bytes) => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }

        Commands::Filename => {
            let report = load_report(&cli.input)?;
            println!("{}", require_filename(&report)?);
            Ok(())
        }

        Commands::Copy => {
            let report = load_report(&cli.input)?;
            if !copy_to_clipboard(&report.markdown) {
                eprintln!("Error: failed to copy the report to the clipboard");
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Doctor { wkhtmltopdf } => {
            crate::backends::doctor::run_doctor(&wkhtmltopdf)
        }
    }
}
