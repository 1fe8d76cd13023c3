//! Response normalization
//!
//! Turns a successful raw response body into a [`NormalizedPage`]: locates
//! the record list regardless of which top-level key holds it, validates
//! record shapes, and computes the continuation cursor from the envelope's
//! pagination signal. Normalization is all-or-nothing; a malformed page is
//! never partially surfaced.

use crate::cursor;
use crate::error::{Error, Result};
use crate::registry::EntityRegistry;
use crate::types::{json_type_name, JsonObject, JsonValue, Record};
use serde::{Deserialize, Serialize};


/// One normalized page of records plus the cursor for the next page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPage {
    /// Records in source order; never reordered
    pub records: Vec<Record>,

    /// Cursor identifying the next page; `None` means the page is terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Pagination signal carried by envelopes that paginate
struct PageSignal {
    offset: u64,
    limit: u64,
    more: bool,
}

/// Normalize a successful response body into a page
///
/// `page_size` is the requested page size; a page shorter than it is treated
/// as terminal even when the envelope claims more data, so pagination always
/// terminates against a miscounting upstream.
pub fn normalize_page(
    registry: &EntityRegistry,
    body: &[u8],
    page_size: u32,
) -> Result<NormalizedPage> {
    let envelope: JsonObject = serde_json::from_slice(body)
        .map_err(|e| Error::internal(format!("failed to parse datasource response: {e}")))?;

    let (entity_key, list) = detect_record_list(registry, &envelope)?;

    let mut records = Vec::with_capacity(list.len());
    for value in list {
        match value {
            JsonValue::Object(record) => records.push(record.clone()),
            other => {
                return Err(Error::internal(format!(
                    "record under {entity_key:?} is not an object: found {}",
                    json_type_name(other)
                )));
            }
        }
    }

    let next_cursor = match page_signal(&envelope)? {
        Some(signal) if signal.more && !short_page(records.len(), page_size) => {
            Some(cursor::advance(signal.offset, signal.limit))
        }
        _ => None,
    };

    Ok(NormalizedPage {
        records,
        next_cursor,
    })
}

/// Locate the record list: first candidate key (registry order, then the
/// generic fallbacks) whose value is a JSON array
fn detect_record_list<'a>(
    registry: &EntityRegistry,
    envelope: &'a JsonObject,
) -> Result<(&'a str, &'a Vec<JsonValue>)> {
    for key in registry.candidate_keys() {
        if let Some((key, JsonValue::Array(list))) = envelope.get_key_value(key) {
            return Ok((key.as_str(), list));
        }
    }
    Err(Error::internal(
        "no valid objects found in datasource response",
    ))
}

/// Extract the `offset`/`limit`/`more` pagination signal, if present
///
/// The three fields form one signal: when any of them is absent the envelope
/// does not paginate. A present-but-mistyped field is an upstream contract
/// violation.
fn page_signal(envelope: &JsonObject) -> Result<Option<PageSignal>> {
    let (Some(offset), Some(limit), Some(more)) = (
        envelope.get("offset"),
        envelope.get("limit"),
        envelope.get("more"),
    ) else {
        return Ok(None);
    };

    Ok(Some(PageSignal {
        offset: unsigned_field(offset, "offset")?,
        limit: unsigned_field(limit, "limit")?,
        more: more.as_bool().ok_or_else(|| {
            Error::internal(format!(
                "pagination field \"more\" is not a boolean: found {}",
                json_type_name(more)
            ))
        })?,
    }))
}

fn unsigned_field(value: &JsonValue, name: &str) -> Result<u64> {
    value.as_u64().ok_or_else(|| {
        Error::internal(format!(
            "pagination field {name:?} is not a non-negative integer: found {}",
            json_type_name(value)
        ))
    })
}

/// Defensive terminal check: fewer records than requested means the source
/// is out of data, whatever its `more` flag says. Only applies when a
/// positive page size was requested.
fn short_page(record_count: usize, page_size: u32) -> bool {
    page_size > 0 && record_count < page_size as usize
}
