#![doc = include_str!("../README.md")]

pub mod compose;
pub mod error;
pub mod host;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use compose::{gql_names, Auth, AuthConfig, GqlAuthExtension, GqlNames, PasswordAuthResult};
pub use error::{AuthError, ConfigError, HostError};
pub use types::{Item, ItemId, ItemSession, ListKey, SessionToken};
