//! Parsing of batch endpoint responses.
//!
//! Expected body: `{ "success": true, "data": { "items": [Item, ...] } }`.
//! Anything else is a shape failure. An empty `items` array is valid.

use feedq_core::Item;
use serde_json::Value;

use crate::error::{FeedHttpError, FeedHttpResult};

/// Validate a batch response envelope and extract its items.
///
/// One malformed item rejects the whole batch; partial batches would hide
/// provider bugs behind silently shorter pages.
pub fn parse_batch_response(json: &Value) -> FeedHttpResult<Vec<Item>> {
    let envelope = json
        .as_object()
        .ok_or_else(|| FeedHttpError::malformed("response body is not a JSON object"))?;

    match envelope.get("success").and_then(Value::as_bool) {
        Some(true) => {}
        Some(false) => {
            let reason = envelope
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("no reason given");
            return Err(FeedHttpError::malformed(format!(
                "provider reported failure: {reason}"
            )));
        }
        None => return Err(FeedHttpError::malformed("missing boolean field 'success'")),
    }

    let items = envelope
        .get("data")
        .and_then(|data| data.get("items"))
        .and_then(Value::as_array)
        .ok_or_else(|| FeedHttpError::malformed("missing array field 'data.items'"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Item::from_json(raw).ok_or_else(|| {
                FeedHttpError::malformed(format!(
                    "item at index {index} lacks a non-empty id or resource locator"
                ))
            })
        })
        .collect()
}
