use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::HostError;
use crate::host::request::{Request, RequestContext};
use crate::types::{Item, ItemId, ItemSession, ListKey, SessionToken};

/// Host-provided session capability pair.
///
/// `start` mints a token for a session value; `get` resolves the session for
/// an inbound request. Composition wraps only `get` and passes `start`
/// through untouched.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl SessionStrategy for StatelessSessions {
///     async fn start(&self, session: ItemSession) -> Result<SessionToken, HostError> {
///         Ok(self.seal(&session)?)
///     }
///
///     async fn get(
///         &self,
///         req: &Request,
///         _query: &dyn ItemQuery,
///     ) -> Result<Option<ItemSession>, HostError> {
///         self.unseal(req)
///     }
/// }
/// ```
#[async_trait]
pub trait SessionStrategy: Send + Sync {
    /// Mint a session token for `session`.
    async fn start(&self, session: ItemSession) -> Result<SessionToken, HostError>;

    /// Resolve the session for `req`, consulting the host data layer as
    /// needed. `None` means no session (absent or invalid).
    async fn get(
        &self,
        req: &Request,
        query: &dyn ItemQuery,
    ) -> Result<Option<ItemSession>, HostError>;
}

/// The identity-provider library's session as seen at our boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSession {
    /// The item the provider resolved this request's session to.
    pub item_id: ItemId,
}

/// Per-request session lookup on the external identity-provider library.
///
/// Covers whatever the provider does internally (cookies, JWTs, upstream
/// calls); this crate only sees the resolved outcome.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the provider-side session for this request, if any.
    async fn resolve(&self, req: &Request) -> Result<Option<ProviderSession>, HostError>;
}

/// Host data-layer capabilities this crate depends on.
///
/// The `*_privileged` operations bypass list access control; they exist
/// because the bootstrap window and initial-item creation must act before
/// any session can satisfy normal access rules.
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Count items in a list, bypassing list access control.
    async fn count_privileged(&self, list: &ListKey) -> Result<u64, HostError>;

    /// Fetch the `selection` fields of one item, bypassing list access
    /// control. `None` when the item does not exist.
    async fn item_data(
        &self,
        list: &ListKey,
        item: &ItemId,
        selection: &str,
    ) -> Result<Option<JsonValue>, HostError>;

    /// Find a single item by exact match on one field.
    async fn find_one(
        &self,
        list: &ListKey,
        field: &str,
        value: &str,
    ) -> Result<Option<Item>, HostError>;

    /// Verify a secret against an item's secret field. Hashing and
    /// comparison live in the host's field system.
    async fn verify_secret(
        &self,
        list: &ListKey,
        item: &ItemId,
        secret: &str,
    ) -> Result<bool, HostError>;

    /// Create an item, bypassing list access control.
    async fn create_privileged(
        &self,
        list: &ListKey,
        data: JsonValue,
    ) -> Result<Item, HostError>;
}

/// A page-level redirect decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
}

impl Redirect {
    #[must_use]
    pub fn to(target: impl Into<String>) -> Self {
        Self { to: target.into() }
    }
}

/// Page middleware: runs before a UI page renders and may short-circuit
/// with a redirect.
#[async_trait]
pub trait PageMiddleware: Send + Sync {
    /// `Ok(Some(_))` redirects; `Ok(None)` lets the page render.
    async fn handle(&self, ctx: &RequestContext) -> Result<Option<Redirect>, HostError>;
}

/// Admin-UI access predicate.
#[async_trait]
pub trait AccessPredicate: Send + Sync {
    async fn allows(&self, ctx: &RequestContext) -> Result<bool, HostError>;
}

/// An artifact the UI build step should materialize on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub output_path: String,
    pub contents: String,
}

/// Callback contributing build artifacts to the admin UI.
pub type AdditionalFilesFn =
    std::sync::Arc<dyn Fn() -> Vec<GeneratedFile> + Send + Sync>;
