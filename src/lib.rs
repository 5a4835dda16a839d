//! ModelCascade - pull a list of models one after another
//!
//! Each model is pulled by invoking an external retrieval tool, retried a
//! bounded number of times with a fixed delay. While a run is in progress
//! the operator can skip the current model from the keyboard or abort the
//! whole run with Ctrl+C; either way a summary is reported at the end.

pub mod cli;
pub mod config;
pub mod coordination;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod input;
pub mod report;
pub mod runner;

pub use error::{CascadeError, Result};
