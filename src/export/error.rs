//! Export error types

use std::path::PathBuf;

/// Errors raised by the export pipeline.
///
/// Every variant means no artifact reached the caller.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A pipeline stage failed
    #[error("export failed during {operation}: {source}")]
    Failed {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The rasterizer produced no bytes
    #[error("export produced an empty document")]
    EmptyArtifact,

    /// `save` mode was requested without a file name
    #[error("save mode requires a file name")]
    MissingFilename,

    /// The rasterizer binary could not be found
    #[error("rasterizer not available: {0}")]
    RasterizerUnavailable(String),

    /// The rasterizer ran but exited unsuccessfully
    #[error("rasterizer exited with {status}: {stderr}")]
    RasterizerFailed { status: String, stderr: String },

    /// IO error touching a file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Wrap a stage error with the name of the stage
    pub fn failed(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            operation,
            source: source.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
