//! Parsing of `op://vault/item[/section]/field` references.

use opref_core::{Error, Result, OP_URI_PREFIX};
use std::fmt;

/// A parsed `op://` secret reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    raw: String,
    vault: String,
    item: String,
    section: String,
    field: String,
}

impl Reference {
    /// Split a raw reference into its components.
    ///
    /// The scheme prefix is expected to have been checked by the caller. Only
    /// three (`vault/item/field`) or four (`vault/item/section/field`) segments
    /// are accepted; segment contents are not validated, so empty segments
    /// come through as empty strings.
    pub fn parse(raw: &str) -> Result<Self> {
        let path = raw.strip_prefix(OP_URI_PREFIX).unwrap_or(raw);
        let parts: Vec<&str> = path.split('/').collect();

        let (vault, item, section, field) = match parts.as_slice() {
            [vault, item, field] => (*vault, *item, "", *field),
            [vault, item, section, field] => (*vault, *item, *section, *field),
            _ => return Err(Error::invalid_reference_format(raw)),
        };

        Ok(Self {
            raw: raw.to_string(),
            vault: vault.to_string(),
            item: item.to_string(),
            section: section.to_string(),
            field: field.to_string(),
        })
    }

    /// The reference exactly as it was given
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn vault(&self) -> &str {
        &self.vault
    }

    #[must_use]
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Section name or id; empty when the reference is unscoped
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
