//! Header multi-map merging.
//!
//! # Design
//! Merging is a union, not an override: a header present on both sides keeps
//! every distinct value, target values first, in first-seen order. Names that
//! only exist in the target are left alone. Value comparison is byte-exact;
//! name comparison follows `HeaderMap` (case-insensitive).

use std::collections::HashMap;

use ureq::http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::RequestError;

/// Merge `source` into `target` in place.
pub fn merge_headers(target: &mut HeaderMap, source: &HeaderMap) {
    for name in source.keys() {
        let mut merged: Vec<HeaderValue> = Vec::new();
        for value in target.get_all(name).iter().chain(source.get_all(name).iter()) {
            if !merged.contains(value) {
                merged.push(value.clone());
            }
        }

        target.remove(name);
        for value in merged {
            target.append(name.clone(), value);
        }
    }
}

/// Parse a plain string map into header names and values.
pub(crate) fn header_map_from(map: &HashMap<String, String>) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::with_capacity(map.len());
    for (name, value) in map {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::InvalidHeader(format!("{name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RequestError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
