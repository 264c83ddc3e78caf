//! Shared domain types

pub mod environment;

pub use environment::EnvironmentVariables;
