//! Single-key JSON envelopes.
//!
//! Zendesk wraps every payload in an object named after the resource:
//! `{"group": {...}}` for one entity, `{"groups": [...], ...}` for a list.
//! These helpers do the wrapping and unwrapping once for every resource.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ZendeskError;
use crate::pagination::{CursorPaginationMeta, Page};

/// Wraps `value` as `{"<key>": value}`.
///
/// # Errors
///
/// Returns `ZendeskError::Serialization` if `value` cannot be encoded.
pub fn wrap<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Value, ZendeskError> {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(Value::Object(map))
}

/// Decodes the value stored under `key` in a JSON object body.
///
/// # Errors
///
/// Returns `ZendeskError::MissingEnvelope` when the key is absent or null,
/// or `ZendeskError::Serialization` when the body or the value does not
/// decode.
pub fn unwrap<T: DeserializeOwned>(key: &str, body: &[u8]) -> Result<T, ZendeskError> {
    let mut map = parse_object(body)?;
    match map.remove(key) {
        Some(Value::Null) | None => Err(ZendeskError::missing_envelope(key)),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

/// Decodes an offset-paginated list: items under `key`, page info at the
/// top level of the body.
///
/// A missing list decodes as empty.
pub fn unwrap_offset_page<T: DeserializeOwned>(
    key: &str,
    body: &[u8],
) -> Result<(Vec<T>, Page), ZendeskError> {
    let mut map = parse_object(body)?;
    let items = take_list(&mut map, key)?;
    let page: Page = serde_json::from_value(Value::Object(map))?;
    Ok((items, page))
}

/// Decodes a cursor-paginated list: items under `key`, cursor metadata
/// under `meta`.
///
/// A missing list decodes as empty and missing metadata as "no more pages".
pub fn unwrap_cursor_page<T: DeserializeOwned>(
    key: &str,
    body: &[u8],
) -> Result<(Vec<T>, CursorPaginationMeta), ZendeskError> {
    let mut map = parse_object(body)?;
    let items = take_list(&mut map, key)?;
    let meta = match map.remove("meta") {
        Some(Value::Null) | None => CursorPaginationMeta::default(),
        Some(value) => serde_json::from_value(value)?,
    };
    Ok((items, meta))
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ZendeskError> {
    Ok(serde_json::from_slice(body)?)
}

fn take_list<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, ZendeskError> {
    match map.remove(key) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Thing {
        name: String,
    }

    #[test]
    fn test_wrap() {
        let value = wrap(
            "thing",
            &Thing {
                name: "a".to_string(),
            },
        )
        .unwrap();
        assert_eq!(value, json!({"thing": {"name": "a"}}));
    }

    #[test]
    fn test_unwrap() {
        let body = br#"{"thing": {"name": "b"}, "other": 1}"#;
        let thing: Thing = unwrap("thing", body).unwrap();
        assert_eq!(thing.name, "b");
    }

    #[test]
    fn test_unwrap_missing_key() {
        let err = unwrap::<Thing>("thing", br#"{"things": []}"#).unwrap_err();
        assert!(matches!(err, ZendeskError::MissingEnvelope { ref key } if key == "thing"));
    }

    #[test]
    fn test_unwrap_rejects_non_object() {
        let err = unwrap::<Thing>("thing", b"[1, 2]").unwrap_err();
        assert!(matches!(err, ZendeskError::Serialization(_)));
    }

    #[test]
    fn test_unwrap_offset_page() {
        let body = br#"{
            "things": [{"name": "a"}, {"name": "b"}],
            "next_page": "https://acme.zendesk.com/api/v2/things.json?page=2",
            "previous_page": null,
            "count": 4
        }"#;
        let (items, page): (Vec<Thing>, Page) = unwrap_offset_page("things", body).unwrap();
        assert_eq!(items.len(), 2);
        assert!(page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.count, 4);
    }

    #[test]
    fn test_unwrap_cursor_page() {
        let body = br#"{
            "things": [{"name": "a"}],
            "meta": {"has_more": true, "after_cursor": "xyz", "before_cursor": "abc"},
            "links": {"next": "https://acme.zendesk.com/api/v2/things.json?page[after]=xyz"}
        }"#;
        let (items, meta): (Vec<Thing>, CursorPaginationMeta) =
            unwrap_cursor_page("things", body).unwrap();
        assert_eq!(items, vec![Thing { name: "a".to_string() }]);
        assert!(meta.has_more);
        assert_eq!(meta.after_cursor, "xyz");
        assert_eq!(meta.before_cursor, "abc");
    }

    #[test]
    fn test_unwrap_cursor_page_without_meta() {
        let (items, meta): (Vec<Thing>, CursorPaginationMeta) =
            unwrap_cursor_page("things", b"{}").unwrap();
        assert!(items.is_empty());
        assert_eq!(meta, CursorPaginationMeta::default());
    }
}
