//! Core domain types, errors, and constants for `opref`.
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace.
//! - **`types`**: the `EnvironmentVariables` newtype.
//! - **`constants`**: binary names, URI prefix and environment variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
