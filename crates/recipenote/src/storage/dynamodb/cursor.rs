//! Opaque pagination cursors.
//!
//! DynamoDB resumes a query from an `ExclusiveStartKey`, which is the raw
//! key map of the last item returned. Handing that map to callers would
//! leak the physical key layout, so the cursor is the URL-safe base64 of
//! its JSON-encoded string attributes. Cursors are only ever round-tripped;
//! callers must treat them as opaque.

use std::collections::BTreeMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use recipenote_core::storage::RepositoryError;

use super::conversions::Item;

/// Encode a `LastEvaluatedKey` into an opaque cursor token.
///
/// All key attributes in this table are strings; anything else in the map
/// is a stored-data fault.
pub fn encode_cursor(key: &Item) -> Result<String, RepositoryError> {
    let mut entries = BTreeMap::new();
    for (name, value) in key {
        let s = value.as_s().map_err(|_| {
            RepositoryError::InvalidData(format!("Non-string key attribute: {}", name))
        })?;
        entries.insert(name.clone(), s.clone());
    }

    let json = serde_json::to_string(&entries)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode an opaque cursor token back into an `ExclusiveStartKey` map.
pub fn decode_cursor(cursor: &str) -> Result<Item, RepositoryError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| RepositoryError::InvalidData("Malformed pagination cursor".to_string()))?;
    let entries: BTreeMap<String, String> = serde_json::from_slice(&bytes)
        .map_err(|_| RepositoryError::InvalidData("Malformed pagination cursor".to_string()))?;

    Ok(entries
        .into_iter()
        .map(|(name, value)| (name, AttributeValue::S(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> Item {
        [
            (
                "PK".to_string(),
                AttributeValue::S("USER#550e8400-e29b-41d4-a716-446655440001".to_string()),
            ),
            (
                "SK".to_string(),
                AttributeValue::S("RECIPE#550e8400-e29b-41d4-a716-446655440002".to_string()),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn cursor_round_trips() {
        let key = sample_key();
        let cursor = encode_cursor(&key).unwrap();
        let decoded = decode_cursor(&cursor).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn cursor_is_opaque() {
        let cursor = encode_cursor(&sample_key()).unwrap();
        assert!(!cursor.contains("USER#"));
        assert!(!cursor.contains("RECIPE#"));
    }

    #[test]
    fn garbage_cursor_is_rejected() {
        assert!(matches!(
            decode_cursor("not b64!!"),
            Err(RepositoryError::InvalidData(_))
        ));
        // Valid base64 of invalid JSON
        let bogus = URL_SAFE_NO_PAD.encode("[1, 2, 3]");
        assert!(matches!(
            decode_cursor(&bogus),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn non_string_key_attribute_is_rejected() {
        let mut key = sample_key();
        key.insert("bad".to_string(), AttributeValue::N("1".to_string()));
        assert!(matches!(
            encode_cursor(&key),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
