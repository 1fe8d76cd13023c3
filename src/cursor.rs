//! Cursor arithmetic
//!
//! A cursor is opaque to callers; for this datasource family it encodes a
//! non-negative offset into the entity's record set. An empty cursor is the
//! first page (offset 0). Offsets strictly increase across consecutive
//! pages until the terminal page, which carries no cursor.

use crate::error::{Error, Result};

/// Decode a cursor into a record offset; the empty cursor is offset 0
pub fn parse_offset(cursor: &str) -> Result<u64> {
    if cursor.is_empty() {
        return Ok(0);
    }
    cursor.parse::<u64>().map_err(|_| {
        Error::invalid_page_request_config(format!(
            "Provided cursor is not a non-negative integer offset: {cursor:?}"
        ))
    })
}

/// Encode the cursor for the page after the one at `offset` with `limit`
/// records per page
pub fn advance(offset: u64, limit: u64) -> String {
    offset.saturating_add(limit).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cursor_is_first_page() {
        assert_eq!(parse_offset("").unwrap(), 0);
    }

    #[test]
    fn test_round_trip() {
        let cursor = advance(0, 100);
        assert_eq!(cursor, "100");
        assert_eq!(parse_offset(&cursor).unwrap(), 100);
    }

    #[test]
    fn test_invalid_cursor_rejected() {
        for cursor in ["abc", "-1", "1.5", "1e3"] {
            let err = parse_offset(cursor).unwrap_err();
            assert!(err.to_string().contains(cursor), "cursor {cursor:?}");
        }
    }

    #[test]
    fn test_offsets_strictly_increase() {
        let mut offset = 0;
        let limit = 7;
        for _ in 0..10 {
            let next = parse_offset(&advance(offset, limit)).unwrap();
            assert!(next > offset);
            offset = next;
        }
        assert_eq!(offset, 70);
    }
}
