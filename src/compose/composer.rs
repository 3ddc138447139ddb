use std::sync::Arc;

use crate::compose::access::{AuthPageMiddleware, AuthPaths};
use crate::compose::bootstrap::AuthAccessPredicate;
use crate::compose::config::AuthConfig;
use crate::compose::files::auth_files;
use crate::compose::schema::GqlAuthExtension;
use crate::compose::session::AuthSessionStrategy;
use crate::error::ConfigError;
use crate::host::{
    AdditionalFilesFn, HostConfig, IdentityProvider, SchemaExtension, SessionStrategy, UiConfig,
};

/// The auth system: an [`AuthConfig`] plus the identity-provider seam,
/// constructed once at startup.
///
/// ```rust,ignore
/// let auth = Auth::new(
///     AuthConfig::new("User", "email").with_session_data("id name"),
///     provider,
/// );
/// let config = auth.with_auth(host_config)?;
/// ```
pub struct Auth {
    config: AuthConfig,
    provider: Arc<dyn IdentityProvider>,
}

impl Auth {
    #[must_use]
    pub fn new(config: AuthConfig, provider: impl IdentityProvider + 'static) -> Self {
        Self {
            config,
            provider: Arc::new(provider),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Check that the configured list and identity field exist in the host
    /// config.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownList`] when the list key is absent;
    /// [`ConfigError::UnknownField`] when the identity field is absent on
    /// the list.
    pub fn validate_config(&self, host: &HostConfig) -> Result<(), ConfigError> {
        let list_key = self.config.list_key();
        let Some(list) = host.lists.get(list_key) else {
            return Err(ConfigError::UnknownList(list_key.clone()));
        };
        if !list.has_field(self.config.identity_field()) {
            return Err(ConfigError::UnknownField {
                list: list_key.clone(),
                field: self.config.identity_field().to_owned(),
            });
        }
        Ok(())
    }

    /// Produce a new host config with authentication woven in.
    ///
    /// The caller's middleware, public pages, access predicate, schema
    /// extension, and file generators all keep running; auth behavior is
    /// layered in front of or after them as each slot requires. The input
    /// is consumed; the caller's own value is never mutated.
    ///
    /// Applying this to an already-composed config duplicates public-page
    /// entries and double-wraps the middleware chain. Compose once.
    ///
    /// # Errors
    ///
    /// Fails like [`validate_config`](Self::validate_config) before any
    /// composition happens.
    pub fn with_auth(&self, host: HostConfig) -> Result<HostConfig, ConfigError> {
        self.validate_config(&host)?;

        let paths = AuthPaths::new(self.config.mount_path(), self.config.provider());
        let HostConfig {
            lists,
            ui,
            session,
            extend_graphql_schema,
        } = host;

        let mut public_pages = ui.public_pages;
        public_pages.extend(paths.public_pages());

        let mut get_additional_files = ui.get_additional_files;
        let files_config = self.config.clone();
        let files_paths = paths.clone();
        let generator: AdditionalFilesFn =
            Arc::new(move || auth_files(&files_config, &files_paths));
        get_additional_files.push(generator);

        let page_middleware = Arc::new(AuthPageMiddleware {
            paths: paths.clone(),
            inner: ui.page_middleware,
        });

        let is_access_allowed = Arc::new(AuthAccessPredicate {
            list_key: self.config.list_key().clone(),
            init_path: paths.init(),
            inner: ui.is_access_allowed,
        });

        // The session strategy is wrapped only when there is both a
        // strategy to wrap and a session_data selection to attach.
        let session: Option<Arc<dyn SessionStrategy>> =
            match (session, self.config.session_data()) {
                (Some(inner), Some(selection)) => Some(Arc::new(AuthSessionStrategy {
                    inner,
                    provider: self.provider.clone(),
                    list_key: self.config.list_key().clone(),
                    session_data: selection.to_owned(),
                })),
                (session, _) => session,
            };

        let gql = GqlAuthExtension::new(&self.config, session.clone());
        let ours = gql.extension();
        let extend_graphql_schema: SchemaExtension = match extend_graphql_schema {
            // The caller's extension runs first so its effects are visible
            // to the auth extension, not vice versa.
            Some(callers) => Arc::new(move |schema| ours(callers(schema))),
            None => ours,
        };

        Ok(HostConfig {
            lists,
            ui: UiConfig {
                public_pages,
                page_middleware: Some(page_middleware),
                get_additional_files,
                is_access_allowed: Some(is_access_allowed),
                enable_session_item: true,
            },
            session,
            extend_graphql_schema: Some(extend_graphql_schema),
        })
    }
}
