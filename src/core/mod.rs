//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Flow/Task/Subtask data model
//! - Rendering of compiled reports to CLI output formats
//! - Common utilities

pub mod model;
pub mod render;
pub mod util;
