//! The item document returned by `op item get --format json`.

use super::uri::Reference;
use serde::{Deserialize, Deserializer, Serialize};

/// An item with its inline fields and file attachments
///
/// Built once from the tool's JSON output and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<FieldEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub field_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: SectionRef,
}

impl FieldEntry {
    /// Matches on id or label, within the reference's section
    #[must_use]
    pub fn matches(&self, reference: &Reference) -> bool {
        (self.id == reference.field() || self.label == reference.field())
            && self.section.matches(reference.section())
    }
}

/// A file attachment; its contents need a separate `op read`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: SectionRef,
}

impl FileEntry {
    /// Matches on id or file name, within the reference's section
    #[must_use]
    pub fn matches(&self, reference: &Reference) -> bool {
        (self.id == reference.field() || self.name == reference.field())
            && self.section.matches(reference.section())
    }
}

/// Section an entry belongs to; both parts are empty for unscoped entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

impl SectionRef {
    /// An empty requested section matches every section.
    ///
    /// This lets `op://vault/item/field` find a field that lives in a section,
    /// at the cost of picking the first one when several sections share a
    /// field name.
    #[must_use]
    pub fn matches(&self, section: &str) -> bool {
        section.is_empty() || self.id == section || self.label == section
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
