//! Report module - Compile flow records into canonical Markdown
//!
//! Provides:
//! - slug: deduplicated heading anchors
//! - shift: header level shifting for embedded Markdown
//! - toc: table of contents
//! - compile: document assembly
//! - filename: export file naming

pub mod compile;
pub mod filename;
pub mod shift;
pub mod slug;
pub mod toc;
