//! reqcat command-line front end.
//!
//! Drives the core against a directory of JSON fixtures standing in for the
//! backend.

pub mod commands;
pub mod config;
pub mod fixtures;
pub mod formatter;

pub use commands::{run, Output};
pub use config::{Args, Command};
pub use fixtures::DirectoryBackend;
pub use formatter::OutputFormat;
