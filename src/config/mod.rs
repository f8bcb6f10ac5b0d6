//! Configuration module for student-records
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RecordsPaths;
pub use settings::Settings;
