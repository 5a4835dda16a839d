//! CLI module for modelcascade - command-line arguments and config overrides.

pub mod commands;

pub use commands::Cli;
