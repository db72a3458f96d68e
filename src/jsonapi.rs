//! JSON:API documents and the attribute plumbing shared by resource clients.
//!
//! Write paths send `{"data": {"type", "id"?, "attributes"}}`. Attribute keys
//! are hyphenated on the wire (`external-id`), whatever style the caller used.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire attributes of a resource object.
pub type Attributes = Map<String, Value>;

/// A JSON:API top-level document.
///
/// `D` is a [`ResourceObject`] for single-resource payloads or a
/// `Vec<ResourceObject>` for collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<D> {
    /// Primary data.
    pub data: D,

    /// Top-level links (`self`, `next`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl<D> Document<D> {
    /// Wraps primary data in a document with no links.
    pub fn new(data: D) -> Self {
        Self { data, links: None }
    }
}

/// A single JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject<A = Attributes> {
    /// The resource type, e.g. `content/courses`.
    #[serde(rename = "type")]
    pub kind: String,

    /// The server-assigned id. Absent when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The resource attributes.
    pub attributes: A,

    /// Resource-level links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// JSON:API links object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    /// Link to this document or resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    /// Link to the next page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Static description of one resource collection.
///
/// Adding a resource client means adding one of these, not new logic.
#[derive(Debug, Clone, Copy)]
pub struct ResourceType {
    /// The JSON:API `type` value.
    pub type_name: &'static str,

    /// Path of the collection below the base URL.
    pub collection: &'static str,

    /// Attributes accepted by update, as `(caller name, wire name)`.
    pub updatable: &'static [(&'static str, &'static str)],
}

impl ResourceType {
    /// Builds a write document for this resource type.
    pub fn document(&self, id: Option<&str>, attributes: Attributes) -> Document<ResourceObject> {
        Document::new(ResourceObject {
            kind: self.type_name.to_string(),
            id: id.map(str::to_string),
            attributes,
            links: None,
        })
    }

    /// Hyphenates caller keys and keeps only the updatable ones. Unknown keys
    /// are dropped silently.
    pub fn updatable_attributes<K, V>(&self, attributes: impl IntoIterator<Item = (K, V)>) -> Attributes
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        attributes
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref();
                let hyphenated = hyphenate(key);
                self.updatable
                    .iter()
                    .find(|(field, wire)| *field == key || *wire == hyphenated)
                    .map(|(_, wire)| (wire.to_string(), value.into()))
            })
            .collect()
    }
}

/// Converts a caller-style key (`duration_type`) to its wire form
/// (`duration-type`).
pub fn hyphenate(key: &str) -> String {
    key.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WIDGETS: ResourceType = ResourceType {
        type_name: "content/widgets",
        collection: "content/widgets",
        updatable: &[("name", "name"), ("size_class", "size-class")],
    };

    #[test]
    fn hyphenates_underscores() {
        assert_eq!(hyphenate("duration_type"), "duration-type");
        assert_eq!(hyphenate("external-id"), "external-id");
        assert_eq!(hyphenate("title"), "title");
    }

    #[test]
    fn updatable_attributes_filters_and_renames() {
        let attrs = WIDGETS.updatable_attributes([
            ("name", json!("w")),
            ("size_class", json!("L")),
            ("colour", json!("red")),
        ]);

        assert_eq!(
            Value::Object(attrs),
            json!({"name": "w", "size-class": "L"})
        );
    }

    #[test]
    fn hyphenated_input_keys_are_accepted() {
        let attrs = WIDGETS.updatable_attributes([("size-class", "M")]);
        assert_eq!(attrs.get("size-class"), Some(&json!("M")));
    }

    #[test]
    fn document_omits_absent_id() {
        let doc = WIDGETS.document(None, Attributes::new());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": {"type": "content/widgets", "attributes": {}}})
        );

        let doc = WIDGETS.document(Some("abc"), Attributes::new());
        assert_eq!(serde_json::to_value(&doc).unwrap()["data"]["id"], "abc");
    }

    #[test]
    fn reads_collection_documents() {
        let doc: Document<Vec<ResourceObject>> = serde_json::from_value(json!({
            "links": {"self": "https://x/content/widgets", "next": "https://x/content/widgets?next=abc"},
            "data": [{"type": "content/widgets", "id": "foo", "attributes": {"name": "w"}}]
        }))
        .unwrap();

        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].id.as_deref(), Some("foo"));
        assert_eq!(
            doc.links.and_then(|l| l.next).as_deref(),
            Some("https://x/content/widgets?next=abc")
        );
    }
}
