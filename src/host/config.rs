use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::host::graphql::SchemaExtension;
use crate::host::traits::{AccessPredicate, AdditionalFilesFn, PageMiddleware, SessionStrategy};
use crate::types::ListKey;

/// The slice of a list definition this crate depends on: its field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConfig {
    pub fields: BTreeSet<String>,
}

impl ListConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }
}

/// The UI sub-config slots this crate reads and composes.
#[derive(Clone, Default)]
pub struct UiConfig {
    /// Routes reachable without a valid session.
    pub public_pages: Vec<String>,
    /// Runs before a UI page renders; may short-circuit with a redirect.
    pub page_middleware: Option<Arc<dyn PageMiddleware>>,
    /// Build-artifact contributors, reduced in order.
    pub get_additional_files: Vec<AdditionalFilesFn>,
    /// Gate on admin-UI data access.
    pub is_access_allowed: Option<Arc<dyn AccessPredicate>>,
    /// Whether sessions carry item data for the UI.
    pub enable_session_item: bool,
}

/// The caller's framework configuration, narrowed to the sub-fields this
/// crate reads and writes. Caller-owned: composition returns a fresh value
/// and never mutates the input.
#[derive(Clone, Default)]
pub struct HostConfig {
    pub lists: BTreeMap<ListKey, ListConfig>,
    pub ui: UiConfig,
    pub session: Option<Arc<dyn SessionStrategy>>,
    pub extend_graphql_schema: Option<SchemaExtension>,
}

impl HostConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_list(mut self, key: impl Into<ListKey>, list: ListConfig) -> Self {
        self.lists.insert(key.into(), list);
        self
    }

    #[must_use]
    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    #[must_use]
    pub fn with_session(mut self, strategy: Arc<dyn SessionStrategy>) -> Self {
        self.session = Some(strategy);
        self
    }

    #[must_use]
    pub fn with_extend_graphql_schema(mut self, extension: SchemaExtension) -> Self {
        self.extend_graphql_schema = Some(extension);
        self
    }
}
