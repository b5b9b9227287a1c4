//! `zfs list` integration.
//!
//! `command` owns process execution; `parse` turns tab separated output into
//! records so the rest of the crate can be tested without a pool.

mod command;
mod parse;

pub use self::command::{FetchError, ListRequest, ListSource, ZfsCommand};
pub use self::parse::{Listing, MalformedRow, parse_list_output};

/// Run `request` against `source` and parse the result.
///
/// Malformed rows are skipped and reported; an empty result is an error
/// so the caller never swaps in a blank tree.
pub fn fetch(source: &dyn ListSource, request: &ListRequest) -> Result<Listing, FetchError> {
    let stdout = source.list(request)?;
    let listing = parse_list_output(&stdout, &request.columns);
    if listing.records.is_empty() {
        return Err(FetchError::Empty);
    }
    for row in &listing.malformed {
        tracing::warn!(line = row.line, text = %row.text, "skipping malformed zfs list row");
    }
    tracing::debug!(
        records = listing.records.len(),
        malformed = listing.malformed.len(),
        "parsed zfs list output"
    );
    Ok(listing)
}

#[cfg(test)]
#[path = "../tests/listing/fetch_tests.rs"]
mod tests;
