use std::collections::BTreeMap;

use crate::types::ListKey;

/// Auth configuration, supplied once at system construction.
///
/// Required fields are constructor parameters; everything else defaults and
/// is overridden with `with_*` methods.
///
/// ```rust
/// use lattice_auth::AuthConfig;
///
/// let config = AuthConfig::new("User", "email")
///     .with_session_data("id name isAdmin")
///     .with_auto_create(true)
///     .with_mount_path("/admin");
/// ```
#[derive(Debug, Clone)]
pub struct AuthConfig {
    list_key: ListKey,
    identity_field: String,
    session_data: Option<String>,
    auto_create: bool,
    provider: String,
    mount_path: String,
    user_map: BTreeMap<String, String>,
    account_map: BTreeMap<String, String>,
    profile_map: BTreeMap<String, String>,
}

impl AuthConfig {
    /// Create a config for authenticating items of `list_key` by
    /// `identity_field`.
    ///
    /// Both must reference entities that exist in the host config;
    /// [`Auth::validate_config`](crate::Auth::validate_config) checks this
    /// before any composition happens.
    #[must_use]
    pub fn new(list_key: impl Into<ListKey>, identity_field: impl Into<String>) -> Self {
        Self {
            list_key: list_key.into(),
            identity_field: identity_field.into(),
            session_data: None,
            auto_create: false,
            provider: "credentials".into(),
            mount_path: String::new(),
            user_map: BTreeMap::new(),
            account_map: BTreeMap::new(),
            profile_map: BTreeMap::new(),
        }
    }

    /// Field selection to attach to every resolved session.
    ///
    /// Without this, the caller's session strategy is used unmodified and
    /// sessions carry no item data.
    #[must_use]
    pub fn with_session_data(mut self, selection: impl Into<String>) -> Self {
        self.session_data = Some(selection.into());
        self
    }

    /// Allow creating the first item through the bootstrap flow.
    #[must_use]
    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    /// Identity-provider route segment used in `signin/<provider>` and
    /// `callback/<provider>` (default: `"credentials"`).
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// URL prefix the admin UI is mounted under. Empty means root-relative.
    ///
    /// Normalized to a leading slash and no trailing slash, so `"admin/"`,
    /// `"/admin"`, and `"/admin/"` are equivalent.
    #[must_use]
    pub fn with_mount_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        self.mount_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Remap identity-provider user fields onto list fields.
    #[must_use]
    pub fn with_user_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.user_map = map;
        self
    }

    /// Remap identity-provider account fields onto list fields.
    #[must_use]
    pub fn with_account_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.account_map = map;
        self
    }

    /// Remap identity-provider profile fields onto list fields.
    #[must_use]
    pub fn with_profile_map(mut self, map: BTreeMap<String, String>) -> Self {
        self.profile_map = map;
        self
    }

    #[must_use]
    pub fn list_key(&self) -> &ListKey {
        &self.list_key
    }

    #[must_use]
    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    #[must_use]
    pub fn session_data(&self) -> Option<&str> {
        self.session_data.as_deref()
    }

    #[must_use]
    pub fn auto_create(&self) -> bool {
        self.auto_create
    }

    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    #[must_use]
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    #[must_use]
    pub fn user_map(&self) -> &BTreeMap<String, String> {
        &self.user_map
    }

    #[must_use]
    pub fn account_map(&self) -> &BTreeMap<String, String> {
        &self.account_map
    }

    #[must_use]
    pub fn profile_map(&self) -> &BTreeMap<String, String> {
        &self.profile_map
    }
}
