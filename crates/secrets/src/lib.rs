//! Resolution of 1Password `op://` secret references for opref
//!
//! [`onepassword::OnePassword`] resolves single references, caching whole
//! items in memory; [`SecretManager`] applies it to a set of environment
//! variables.

pub mod manager;
pub mod onepassword;

pub use manager::SecretManager;
pub use onepassword::{OnePassword, OnePasswordConfig, Reference};
