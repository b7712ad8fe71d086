//! Command implementations for the citegen CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! citegen and citegen-style crates for the actual work.

pub mod normalize;
pub mod style_info;
