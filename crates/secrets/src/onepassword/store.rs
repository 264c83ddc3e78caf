//! In-memory cache of fetched items, keyed by vault then item.

use super::item::ItemDocument;
use opref_core::{Error, Result};
use std::collections::HashMap;

/// Items fetched so far, grouped by vault
///
/// Keys are the vault and item names exactly as written in the references.
/// Entries are never evicted; the store lives as long as its resolver.
#[derive(Debug, Default)]
pub struct ItemStore {
    vaults: HashMap<String, HashMap<String, ItemDocument>>,
}

impl ItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached item
    pub fn get(&self, vault: &str, item: &str) -> Result<&ItemDocument> {
        let items = self.vaults.get(vault).ok_or_else(|| Error::VaultNotCached {
            vault: vault.to_string(),
        })?;
        items.get(item).ok_or_else(|| Error::ItemNotCached {
            vault: vault.to_string(),
            item: item.to_string(),
        })
    }

    /// Whether an item has been cached
    #[must_use]
    pub fn contains(&self, vault: &str, item: &str) -> bool {
        self.vaults
            .get(vault)
            .is_some_and(|items| items.contains_key(item))
    }

    /// Insert or overwrite an item, creating the vault bucket on first use
    pub fn set(&mut self, vault: impl Into<String>, item: impl Into<String>, document: ItemDocument) {
        self.vaults
            .entry(vault.into())
            .or_default()
            .insert(item.into(), document);
    }

    /// Number of cached items across all vaults
    #[must_use]
    pub fn len(&self) -> usize {
        self.vaults.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ItemDocument {
        ItemDocument {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut store = ItemStore::new();
        store.set("testVault", "testItem", item("testItem"));

        let retrieved = store.get("testVault", "testItem").unwrap();
        assert_eq!(retrieved.id, "testItem");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_vault_and_item() {
        let mut store = ItemStore::new();
        assert!(store.is_empty());

        let err = store.get("nonExistentVault", "testItem").unwrap_err();
        assert_eq!(err.to_string(), "no such vault nonExistentVault");

        store.set("testVault", "testItem", item("testItem"));
        let err = store.get("testVault", "nonExistentItem").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no such item nonExistentItem in vault testVault"
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut store = ItemStore::new();
        store.set("Vault", "Item", item("1"));
        assert!(store.get("vault", "Item").is_err());
        assert!(store.get("Vault", "item").is_err());
    }

    #[test]
    fn test_set_overwrites_and_shares_vault_bucket() {
        let mut store = ItemStore::new();
        store.set("v", "a", item("first"));
        store.set("v", "a", item("second"));
        store.set("v", "b", item("other"));

        assert_eq!(store.get("v", "a").unwrap().id, "second");
        assert_eq!(store.get("v", "b").unwrap().id, "other");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_contains() {
        let mut store = ItemStore::new();
        assert!(!store.contains("v", "a"));

        store.set("v", "a", item("a"));
        assert!(store.contains("v", "a"));
        assert!(!store.contains("v", "b"));
        assert!(!store.contains("V", "a"));
    }
}
