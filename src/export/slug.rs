//! Slug derivation from canonical Trello URLs
//!
//! `https://trello.com/b/WODq2cwg/sample-board` becomes `sample-board` and
//! `https://trello.com/c/HGYGb5iM/2-sample-card` becomes `sample-card`: the
//! last path segment, minus the card ordinal Trello prefixes it with.
//! Segments are percent-decoded, so `3-caf%C3%A9` becomes `café`.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{ExportError, ExportResult};

/// Derive a file name fragment from an entity reference
///
/// # Errors
///
/// Returns `InvalidReference` when the reference is not an absolute URL, has
/// no final path segment, or that segment does not decode to a file name.
pub fn slug(reference: &str) -> ExportResult<String> {
    let invalid = || ExportError::invalid_reference(reference);
    let url = Url::parse(reference).map_err(|_| invalid())?;

    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(invalid)?;

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| invalid())?;
    let unsafe_name = decoded.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if unsafe_name || decoded == "." || decoded == ".." {
        return Err(invalid());
    }

    Ok(strip_ordinal(&decoded).to_string())
}

/// Drop a leading `<digits>-` prefix, unless nothing would be left
///
/// A card whose title has nothing sluggable gets a URL ending in `12-`; that
/// segment is kept whole.
fn strip_ordinal(segment: &str) -> &str {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return segment;
    }
    match segment[digits..].strip_prefix('-') {
        Some(rest) if !rest.is_empty() => rest,
        _ => segment,
    }
}
