#![forbid(unsafe_code)]

//! List records.
//!
//! The panel never owns or mutates caller data. Anything that can report a
//! title and a subtitle can be listed by implementing [`ListRecord`];
//! [`Item`] is a ready-made record that deserializes from loose JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A caller-owned record the panel can display.
///
/// Only the display fields are required. Missing display text renders as
/// an empty line; missing identity falls back to a positional key.
pub trait ListRecord {
    /// Primary display line.
    fn title(&self) -> Option<&str>;

    /// Secondary display line.
    fn subtitle(&self) -> Option<&str>;

    /// Explicit key. Preferred over [`id`](ListRecord::id) for key derivation.
    fn key(&self) -> Option<String> {
        None
    }

    /// Natural identifier.
    fn id(&self) -> Option<String> {
        None
    }

    /// A named field as display text, for field-based grouping.
    fn field(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Loosely typed list record.
///
/// ```
/// use droplist_widgets::item::{Item, ListRecord};
///
/// let item: Item = serde_json::from_str(
///     r#"{"id": 1, "title": "Apples", "category": "Fruit"}"#,
/// ).unwrap();
/// assert_eq!(item.id().as_deref(), Some("1"));
/// assert_eq!(item.field("category").as_deref(), Some("Fruit"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Every other field, kept for grouping.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Item {
    /// Record with just a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the natural identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the explicit key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an extra field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl ListRecord for Item {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    fn key(&self) -> Option<String> {
        self.key.clone().filter(|k| !k.is_empty())
    }

    fn id(&self) -> Option<String> {
        self.id.as_ref().and_then(display_value)
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id(),
            "key" => self.key(),
            "title" => self.title.clone(),
            "subtitle" => self.subtitle.clone(),
            _ => self.fields.get(name).and_then(display_value),
        }
        .filter(|s| !s.is_empty())
    }
}

/// Coerce a JSON value to display text.
///
/// Strings are used verbatim, `null` is absent, everything else uses its
/// compact JSON text.
#[must_use]
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_coerce() {
        assert_eq!(Item::new("a").with_id(7).id().as_deref(), Some("7"));
        assert_eq!(Item::new("a").with_id("x9").id().as_deref(), Some("x9"));
        assert_eq!(Item::new("a").with_id(Value::Null).id(), None);
    }

    #[test]
    fn empty_identity_counts_as_absent() {
        let item = Item::new("a").with_key("").with_id("");
        assert_eq!(item.key(), None);
        assert_eq!(item.id(), None);
    }

    #[test]
    fn field_reads_extra_and_builtin_fields() {
        let item = Item::new("Pear")
            .with_field("category", "Fruit")
            .with_field("stock", 3)
            .with_field("organic", true)
            .with_field("tags", json!(["a", "b"]));
        assert_eq!(item.field("category").as_deref(), Some("Fruit"));
        assert_eq!(item.field("stock").as_deref(), Some("3"));
        assert_eq!(item.field("organic").as_deref(), Some("true"));
        assert_eq!(item.field("tags").as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(item.field("title").as_deref(), Some("Pear"));
        assert_eq!(item.field("missing"), None);
    }

    #[test]
    fn empty_field_is_absent() {
        let item = Item::new("x").with_field("category", "");
        assert_eq!(item.field("category"), None);
    }

    #[test]
    fn deserializes_loose_records() {
        let items: Vec<Item> = serde_json::from_value(json!([
            {"id": 1, "title": "A"},
            {"key": "k", "subtitle": "only sub", "category": "X"},
            {}
        ]))
        .expect("parse");
        assert_eq!(items[0].title(), Some("A"));
        assert_eq!(items[1].title(), None);
        assert_eq!(items[1].field("category").as_deref(), Some("X"));
        assert_eq!(items[2], Item::default());
    }
}
