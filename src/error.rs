use crate::types::ListKey;

/// Error type used across the collaborator seams.
///
/// Host implementations of [`ItemQuery`](crate::host::ItemQuery),
/// [`SessionStrategy`](crate::host::SessionStrategy) and friends return
/// whatever error type they like behind this box; this crate propagates them
/// unchanged.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration errors raised at composition time, before any request is
/// served.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configured list key does not exist in the host config.
    #[error("list '{0}' not found in host config")]
    UnknownList(ListKey),

    /// The configured identity field does not exist on the list.
    #[error("field '{field}' not found on list '{list}'")]
    UnknownField { list: ListKey, field: String },
}

/// Host wiring faults surfaced by the GraphQL auth operations.
///
/// These are not authentication failures; wrong credentials are reported as
/// [`PasswordAuthResult::Failure`](crate::compose::PasswordAuthResult).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// `createInitial` was invoked but auto-create is disabled.
    #[error("bootstrap item creation is disabled")]
    AutoCreateDisabled,

    /// `createInitial` was invoked after the list already has items.
    #[error("list '{0}' already contains items")]
    AlreadyInitialized(ListKey),

    /// An operation needed to mint a session token, but the host config has
    /// no session strategy.
    #[error("no session strategy is configured")]
    NoSessionStrategy,
}
