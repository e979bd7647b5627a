//! CLI module for the oracle binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
