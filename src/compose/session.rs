use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::host::{IdentityProvider, ItemQuery, Request, SessionStrategy};
use crate::types::{ItemSession, ListKey, SessionToken};

/// Path segment marking provider-internal routes. Requests under it are
/// never augmented, so the login handshake cannot recurse into item lookups.
const AUTH_API_SEGMENT: &str = "/api/auth";

/// Wraps the caller's session strategy with item augmentation.
///
/// `start` passes through untouched. `get` resolves the identity provider's
/// session and materializes `{ list_key, item_id, data }` with the
/// configured `session_data` selection fetched from the host data layer.
pub(crate) struct AuthSessionStrategy {
    pub(crate) inner: Arc<dyn SessionStrategy>,
    pub(crate) provider: Arc<dyn IdentityProvider>,
    pub(crate) list_key: ListKey,
    pub(crate) session_data: String,
}

#[async_trait]
impl SessionStrategy for AuthSessionStrategy {
    async fn start(&self, session: ItemSession) -> Result<SessionToken, HostError> {
        self.inner.start(session).await
    }

    async fn get(
        &self,
        req: &Request,
        query: &dyn ItemQuery,
    ) -> Result<Option<ItemSession>, HostError> {
        if req.path().contains(AUTH_API_SEGMENT) {
            return Ok(None);
        }

        let Some(provider_session) = self.provider.resolve(req).await? else {
            return Ok(None);
        };

        let Some(data) = query
            .item_data(&self.list_key, &provider_session.item_id, &self.session_data)
            .await?
        else {
            tracing::debug!(
                list = %self.list_key,
                item = %provider_session.item_id,
                "session item no longer exists, treating session as absent"
            );
            return Ok(None);
        };

        Ok(Some(ItemSession {
            list_key: self.list_key.clone(),
            item_id: provider_session.item_id,
            data,
        }))
    }
}
