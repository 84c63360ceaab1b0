//! Group models for the Zendesk API.
//!
//! Groups collect agents that tickets can be assigned to.
//!
//! ref: <https://developer.zendesk.com/api-reference/ticketing/groups/groups/>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{empty_string_as_none, is_false, null_as_false, zero_as_none};
use crate::pagination::PageOptions;
use crate::query::QueryParams;

/// A support group.
///
/// Only `name` is always sent; every other field is left out of outgoing
/// JSON while unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Assigned by the server.
    #[serde(
        default,
        deserialize_with = "zero_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,

    /// API URL of this group.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    /// Group name.
    #[serde(default)]
    pub name: String,

    /// Whether this is the account's default group.
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub default: bool,

    /// Whether the group has been deleted.
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub deleted: bool,

    /// Free-form description.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Creates a group payload with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Options for [`Client::get_groups`](crate::Client::get_groups).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupListOptions {
    /// Page selection.
    pub page: PageOptions,
}

impl QueryParams for GroupListOptions {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        self.page.append_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_group_serializes_name_only() {
        let value = serde_json::to_value(Group::new("Support")).unwrap();
        assert_eq!(value, json!({"name": "Support"}));
    }

    #[test]
    fn test_empty_name_is_still_sent() {
        let value = serde_json::to_value(Group::default()).unwrap();
        assert_eq!(value, json!({"name": ""}));
    }

    #[test]
    fn test_group_deserialize() {
        let json = r#"{
            "id": 360001234,
            "url": "https://acme.zendesk.com/api/v2/groups/360001234.json",
            "name": "Tier 2",
            "default": false,
            "deleted": false,
            "description": "",
            "is_public": true,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T11:30:00Z"
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.id, Some(360001234));
        assert_eq!(group.name, "Tier 2");
        assert!(!group.default);
        assert!(group.description.is_none());
        assert_eq!(
            group.created_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_group_round_trip_keeps_set_fields() {
        let group = Group {
            id: Some(7),
            url: None,
            name: "Billing".to_string(),
            default: true,
            deleted: false,
            description: Some("Money questions".to_string()),
            created_at: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            updated_at: None,
        };
        let json = serde_json::to_string(&group).unwrap();
        assert!(!json.contains("deleted"));
        assert!(!json.contains("url"));
        let back: Group = serde_json::from_str(&json).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn test_group_list_options_query() {
        let opts = GroupListOptions {
            page: PageOptions::new(3, 25),
        };
        assert_eq!(
            opts.to_pairs(),
            vec![("page", "3".to_string()), ("per_page", "25".to_string())]
        );
    }
}
