//! Doctor - Dependency checking

use anyhow::Result;
use colored::Colorize;

use crate::core::util::command_exists;
use crate::export::pdf::Wkhtmltopdf;
use crate::export::text::clipboard_command;

/// Dependency status
#[derive(Debug, Clone)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub command: Option<String>,
    pub required: bool,
    pub notes: Option<String>,
}

impl DependencyStatus {
    /// One human-readable status line (plus an optional note line)
    pub fn to_line(&self) -> String {
        let status = if self.available {
            "✓".green()
        } else if self.required {
            "✗".red()
        } else {
            "✗".yellow()
        };
        let required = if self.required {
            "required"
        } else {
            "optional"
        };

        let mut line = format!(
            "{} {} ({}) - {}",
            status,
            self.name,
            required,
            self.command
                .as_ref()
                .map(|c| format!("found: {}", c))
                .unwrap_or_else(|| "not found".to_string())
        );

        if let Some(notes) = &self.notes {
            line.push_str(&format!("\n  Note: {}", notes));
        }

        line
    }
}

/// Check all dependencies
pub fn check_dependencies(rasterizer: &Wkhtmltopdf, program: &str) -> Vec<DependencyStatus> {
    let mut deps = Vec::new();

    // wkhtmltopdf (required for export)
    let wkhtmltopdf_available = rasterizer.is_available();
    deps.push(DependencyStatus {
        name: "wkhtmltopdf".to_string(),
        available: wkhtmltopdf_available,
        command: wkhtmltopdf_available.then(|| program.to_string()),
        required: true,
        notes: Some("Install: brew install wkhtmltopdf / apt install wkhtmltopdf".to_string()),
    });

    // clipboard helper (optional, for copy command)
    let clipboard = clipboard_command().map(|(program, _)| program.to_string());
    deps.push(DependencyStatus {
        name: "clipboard".to_string(),
        available: clipboard.is_some(),
        command: clipboard,
        required: false,
        notes: Some("One of: pbcopy, wl-copy, xclip, xsel".to_string()),
    });

    // which (used to probe everything above)
    let which_available = command_exists("which");
    deps.push(DependencyStatus {
        name: "which".to_string(),
        available: which_available,
        command: which_available.then(|| "which".to_string()),
        required: true,
        notes: None,
    });

    deps
}

/// Run the doctor command
pub fn run_doctor(program: &str) -> Result<()> {
    let rasterizer = Wkhtmltopdf::new(program);
    let deps = check_dependencies(&rasterizer, program);

    for dep in &deps {
        println!("{}", dep.to_line());
    }

    if deps.iter().any(|d| d.required && !d.available) {
        eprintln!("\n⚠️  Some required dependencies are missing!");
    }

    Ok(())
}
