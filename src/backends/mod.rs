//! Backends module - External tool integrations
//!
//! Provides:
//! - doctor: Dependency checking

pub mod doctor;
