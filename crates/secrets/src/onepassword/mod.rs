//! 1Password `op://` reference resolution
//!
//! - **`uri`**: parses `op://vault/item[/section]/field` into a [`Reference`].
//! - **`executor`**: the [`CommandExecutor`] capability and the production
//!   [`SystemCommandExecutor`] with retry and backoff.
//! - **`store`**: [`ItemStore`], the in-memory item cache.
//! - **`matcher`**: finds the field or file a reference points at.
//! - **`resolver`**: [`OnePassword`], tying the pieces together.

mod config;
mod executor;
mod item;
mod matcher;
mod resolver;
mod store;
mod uri;


pub use config::OnePasswordConfig;
pub use executor::{CommandExecutor, SystemCommandExecutor};
pub use item::{FieldEntry, FileEntry, ItemDocument, SectionRef};
pub use matcher::find_value;
pub use resolver::OnePassword;
pub use store::ItemStore;
pub use uri::Reference;

#[cfg(test)]
pub(crate) use executor::{RecordingExecutor, TestResponse};
