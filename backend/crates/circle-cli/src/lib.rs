//! circle-cli library
//!
//! Maintenance commands for the live event and camera fan-out.

pub mod camera_check;
pub mod cli;
pub mod commands;
pub mod error;
pub mod watch;

#[cfg(test)]
mod tests;

pub use camera_check::{CameraReport, run_camera_check};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, CliResult};
pub use watch::{format_record, watch};
