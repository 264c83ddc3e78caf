//! Resolution of `op://` references with a per-resolver item cache.

use super::config::OnePasswordConfig;
use super::executor::{CommandExecutor, SystemCommandExecutor};
use super::item::ItemDocument;
use super::matcher;
use super::store::ItemStore;
use super::uri::Reference;
use opref_core::{Error, Result, OP_URI_PREFIX};

/// Resolver for 1Password references backed by the `op` CLI
///
/// Whole items are cached after their first fetch, so resolving several
/// fields of one item costs a single `op item get`. The cache is owned by
/// this value and is not shared or synchronised.
pub struct OnePassword {
    executor: Box<dyn CommandExecutor>,
    store: ItemStore,
    account: Option<String>,
    installed: bool,
}

impl OnePassword {
    /// Create a resolver that runs the real CLI described by `config`
    #[must_use]
    pub fn new(config: OnePasswordConfig) -> Self {
        let executor = SystemCommandExecutor::new(&config);
        let resolver = Self::with_executor(Box::new(executor));
        match config.account {
            Some(account) => resolver.with_account(account),
            None => resolver,
        }
    }

    /// Create a resolver with a custom executor
    ///
    /// The executor is asked once, here, whether the CLI is installed.
    #[must_use]
    pub fn with_executor(executor: Box<dyn CommandExecutor>) -> Self {
        let installed = executor.is_installed();
        Self {
            executor,
            store: ItemStore::new(),
            account: None,
            installed,
        }
    }

    /// Pass `--account` when fetching items
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Items fetched so far
    #[must_use]
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Resolve `raw` to the secret it references.
    ///
    /// Values without the `op://` prefix fail with
    /// [`Error::InvalidReference`], which carries `raw` so callers can use it
    /// as a literal instead (see [`OnePassword::resolve_or_literal`]).
    pub fn resolve_reference(&mut self, raw: &str) -> Result<String> {
        if !raw.starts_with(OP_URI_PREFIX) {
            return Err(Error::invalid_reference(raw));
        }
        tracing::info!(reference = %raw, "Resolving 1Password entry");

        let reference = Reference::parse(raw)?;

        if !self.installed {
            let err = Error::ToolNotInstalled;
            tracing::error!("{err}");
            return Err(err);
        }

        if !self.store.contains(reference.vault(), reference.item()) {
            tracing::debug!(
                vault = %reference.vault(),
                item = %reference.item(),
                "Item cache miss"
            );
            let document = self.fetch_item(&reference)?;
            self.store.set(reference.vault(), reference.item(), document);
        }

        let document = self.store.get(reference.vault(), reference.item())?;
        let executor = &self.executor;
        matcher::find_value(document, &reference, |raw| executor.execute(&read_args(raw)))
    }

    /// Like [`OnePassword::resolve_reference`], but values that are not
    /// `op://` references come back unchanged.
    pub fn resolve_or_literal(&mut self, raw: &str) -> Result<String> {
        match self.resolve_reference(raw) {
            Err(Error::InvalidReference { reference }) => Ok(reference),
            other => other,
        }
    }

    fn fetch_item(&self, reference: &Reference) -> Result<ItemDocument> {
        let args = self.item_get_args(reference);
        let output = self.executor.execute(&args)?;
        let document = serde_json::from_slice(&output).map_err(|e| {
            Error::malformed_item_document(reference.vault(), reference.item(), e)
        })?;
        tracing::debug!(
            vault = %reference.vault(),
            item = %reference.item(),
            "Fetched item"
        );
        Ok(document)
    }

    fn item_get_args(&self, reference: &Reference) -> Vec<String> {
        let mut args: Vec<String> = ["item", "get", "--format", "json"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        args.push(reference.item().to_string());
        args.push("--vault".to_string());
        args.push(reference.vault().to_string());
        if let Some(account) = &self.account {
            args.push("--account".to_string());
            args.push(account.clone());
        }
        args
    }
}

fn read_args(raw: &str) -> Vec<String> {
    vec!["read".to_string(), raw.to_string()]
}
