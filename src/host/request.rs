use std::sync::Arc;

use http::HeaderMap;
use url::Url;

use crate::host::traits::ItemQuery;
use crate::types::ItemSession;

/// Inbound HTTP-level contract consumed by this crate.
///
/// Only the request path and the `host`, `x-forwarded-host`, and `referer`
/// headers are consumed, and only for path/host comparison. The host
/// framework builds one of these from its transport layer per request.
#[derive(Debug, Clone)]
pub struct Request {
    path: String,
    host: Option<String>,
    referer: Option<String>,
}

impl Request {
    /// Create a request carrying only a path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: None,
            referer: None,
        }
    }

    /// Create a request from a path and the inbound header map.
    ///
    /// `x-forwarded-host` takes precedence over `host`, matching what a
    /// reverse proxy in front of the admin UI reports.
    #[must_use]
    pub fn from_parts(path: impl Into<String>, headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        };

        Self {
            path: path.into(),
            host: header("x-forwarded-host").or_else(|| header("host")),
            referer: header("referer"),
        }
    }

    /// Set the effective host (tests and non-HTTP callers).
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the referer URL (tests and non-HTTP callers).
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// The request path, query string excluded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The effective request host, `x-forwarded-host` first.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The referring page, if the header carried a parseable URL.
    #[must_use]
    pub fn referer(&self) -> Option<Url> {
        self.referer.as_deref().and_then(|r| Url::parse(r).ok())
    }
}

/// Per-request bundle handed to page middleware and access predicates.
///
/// Carries the request, the session resolved for it (if any), and a handle
/// to the host data layer. Created per inbound request and discarded after
/// the response is produced.
#[derive(Clone)]
pub struct RequestContext {
    pub request: Request,
    pub session: Option<ItemSession>,
    pub query: Arc<dyn ItemQuery>,
}

impl RequestContext {
    #[must_use]
    pub fn new(
        request: Request,
        session: Option<ItemSession>,
        query: Arc<dyn ItemQuery>,
    ) -> Self {
        Self {
            request,
            session,
            query,
        }
    }

    /// Whether the request carries a resolved session.
    #[must_use]
    pub fn is_valid_session(&self) -> bool {
        self.session.is_some()
    }
}
