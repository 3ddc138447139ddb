use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::error::HostError;
use crate::host::{AccessPredicate, RequestContext};
use crate::types::ListKey;

/// Composed admin-UI access predicate.
///
/// The bootstrap carve-out is checked first: while the target list is empty,
/// the init page may be used without a session. Past that, the caller's own
/// predicate decides; with no caller predicate, a defined session is the
/// default requirement.
pub(crate) struct AuthAccessPredicate {
    pub(crate) list_key: ListKey,
    pub(crate) init_path: String,
    pub(crate) inner: Option<Arc<dyn AccessPredicate>>,
}

impl AuthAccessPredicate {
    /// The bootstrap window: referer path is the init page, referer host
    /// matches the request host, and a privileged live count of the list is
    /// exactly zero. A failed count propagates; it never defaults to allow.
    async fn bootstrap_window(&self, ctx: &RequestContext) -> Result<bool, HostError> {
        let Some(referer) = ctx.request.referer() else {
            return Ok(false);
        };
        if referer.path() != self.init_path {
            return Ok(false);
        }
        let Some(request_host) = ctx.request.host() else {
            return Ok(false);
        };
        if !host_matches(&referer, request_host) {
            return Ok(false);
        }

        let count = ctx.query.count_privileged(&self.list_key).await?;
        Ok(count == 0)
    }
}

#[async_trait]
impl AccessPredicate for AuthAccessPredicate {
    async fn allows(&self, ctx: &RequestContext) -> Result<bool, HostError> {
        if self.bootstrap_window(ctx).await? {
            tracing::debug!(list = %self.list_key, "bootstrap window open, allowing init access");
            return Ok(true);
        }
        match &self.inner {
            Some(predicate) => predicate.allows(ctx).await,
            None => Ok(ctx.session.is_some()),
        }
    }
}

/// Compare the referer's authority against the `Host`-style header value,
/// which may carry an explicit port.
fn host_matches(referer: &Url, request_host: &str) -> bool {
    let Some(host) = referer.host_str() else {
        return false;
    };
    match referer.port() {
        Some(port) => format!("{host}:{port}") == request_host,
        None => host == request_host,
    }
}
