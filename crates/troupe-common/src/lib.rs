//! Troupe Common - Shared utilities and types
//!
//! This crate provides the configuration store, the structured tool error
//! type, and small file/formatting utilities used across all Troupe
//! components.

pub mod config;
pub mod error;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use error::{Result, ToolError};
pub use utils::{format_response, load_from_file, save_to_file};
