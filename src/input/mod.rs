//! Where model names come from, and which of them are accepted.
//!
//! Sources produce raw candidate strings; [`validate_items`] turns them into
//! [`Item`]s and [`collect_items`] enforces that something is left to pull.

mod source;

pub use source::{InputMethod, ItemSource, parse_lines, prompt_input_method, read_file, read_interactive};

use log::warn;

use crate::domain::Item;
use crate::error::{CascadeError, Result};

/// Keep valid names in input order, logging each rejected one.
pub fn validate_items<S: AsRef<str>>(candidates: &[S]) -> Vec<Item> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let item = Item::parse(candidate);
            if item.is_none() {
                warn!("Skipping invalid model name: {:?}", candidate);
            }
            item
        })
        .collect()
}

/// Validate candidates, failing when nothing usable remains.
pub fn collect_items<S: AsRef<str>>(candidates: &[S]) -> Result<Vec<Item>> {
    if candidates.is_empty() {
        return Err(CascadeError::NoItems);
    }
    let items = validate_items(candidates);
    if items.is_empty() {
        return Err(CascadeError::NoValidItems);
    }
    Ok(items)
}
