use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::host::{PageMiddleware, Redirect, RequestContext};

/// The fixed route surface the identity provider serves under the mount
/// path, relative to `<mount>/api/auth/`.
const PROVIDER_ROUTES: [&str; 6] = ["csrf", "signin", "callback", "session", "providers", "signout"];

/// Auth-relevant URL surface derived from the mount path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthPaths {
    base: String,
    provider: String,
}

impl AuthPaths {
    pub(crate) fn new(mount_path: &str, provider: &str) -> Self {
        Self {
            base: mount_path.to_owned(),
            provider: provider.to_owned(),
        }
    }

    /// Prefix of every identity-provider endpoint.
    pub(crate) fn api_prefix(&self) -> String {
        format!("{}/api/auth", self.base)
    }

    /// The provider's sign-in page.
    pub(crate) fn signin(&self) -> String {
        format!("{}/api/auth/signin", self.base)
    }

    /// The application root under the mount path.
    pub(crate) fn root(&self) -> String {
        if self.base.is_empty() {
            "/".to_owned()
        } else {
            self.base.clone()
        }
    }

    /// The admin UI's first-item page.
    pub(crate) fn init(&self) -> String {
        format!("{}/init", self.base)
    }

    /// The 8 provider routes that must stay publicly reachable: the six
    /// fixed endpoints plus the provider-scoped signin and callback.
    pub(crate) fn public_pages(&self) -> Vec<String> {
        let prefix = self.api_prefix();
        let mut pages: Vec<String> = PROVIDER_ROUTES
            .iter()
            .map(|route| format!("{prefix}/{route}"))
            .collect();
        pages.push(format!("{prefix}/signin/{}", self.provider));
        pages.push(format!("{prefix}/callback/{}", self.provider));
        pages
    }
}

/// Outcome of the page-level access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDecision {
    /// No opinion; the page (or the caller's middleware) proceeds.
    Continue,
    /// Short-circuit with a redirect to the given path.
    Redirect(String),
}

/// Pure page-level routing decision over the request path and session
/// validity.
///
/// Evaluated in order: a signed-in visit to the sign-in page bounces to the
/// application root; other signed-in requests pass; a signed-out request
/// outside the auth API bounces to the sign-in page; signed-out requests on
/// provider endpoints pass so the provider's own handlers can run.
pub(crate) fn decide(paths: &AuthPaths, path: &str, is_valid_session: bool) -> PageDecision {
    if is_valid_session {
        if path == paths.signin() {
            return PageDecision::Redirect(paths.root());
        }
        return PageDecision::Continue;
    }

    if !path.starts_with(&paths.api_prefix()) {
        return PageDecision::Redirect(paths.signin());
    }

    PageDecision::Continue
}

/// Composed page middleware: the auth decision runs first; when it has no
/// opinion, the caller's middleware (if any) runs and its result stands.
pub(crate) struct AuthPageMiddleware {
    pub(crate) paths: AuthPaths,
    pub(crate) inner: Option<Arc<dyn PageMiddleware>>,
}

#[async_trait]
impl PageMiddleware for AuthPageMiddleware {
    async fn handle(&self, ctx: &RequestContext) -> Result<Option<Redirect>, HostError> {
        match decide(&self.paths, ctx.request.path(), ctx.is_valid_session()) {
            PageDecision::Redirect(to) => Ok(Some(Redirect::to(to))),
            PageDecision::Continue => match &self.inner {
                Some(middleware) => middleware.handle(ctx).await,
                None => Ok(None),
            },
        }
    }
}
