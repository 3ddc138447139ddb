use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::compose::config::AuthConfig;
use crate::error::{AuthError, HostError};
use crate::host::{FieldDef, GraphqlSchema, ItemQuery, SchemaExtension, SessionStrategy, TypeDef};
use crate::types::{Item, ItemSession, ListKey, SessionToken};

/// One message for unknown identity and wrong secret alike.
const AUTH_FAILURE_MESSAGE: &str = "Authentication failed.";

/// Generated GraphQL names for one list. Pure function of the list key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GqlNames {
    pub authenticate_item_with_password: String,
    pub item_authentication_with_password_result: String,
    pub item_authentication_with_password_success: String,
    pub item_authentication_with_password_failure: String,
    pub create_initial_item: String,
    pub create_initial_input: String,
}

/// Derive the operation and type names for `list_key`.
#[must_use]
pub fn gql_names(list_key: &ListKey) -> GqlNames {
    let key = list_key.as_str();
    GqlNames {
        authenticate_item_with_password: format!("authenticate{key}WithPassword"),
        item_authentication_with_password_result: format!(
            "{key}AuthenticationWithPasswordResult"
        ),
        item_authentication_with_password_success: format!(
            "{key}AuthenticationWithPasswordSuccess"
        ),
        item_authentication_with_password_failure: format!(
            "{key}AuthenticationWithPasswordFailure"
        ),
        create_initial_item: format!("createInitial{key}"),
        create_initial_input: format!("CreateInitial{key}Input"),
    }
}

/// Outcome of the password authentication operation.
///
/// Wrong credentials are a result variant, never a fault: callers branch on
/// the kind, and the two variants are structurally distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum PasswordAuthResult {
    Success {
        item: Item,
        session_token: SessionToken,
    },
    Failure {
        message: String,
    },
}

/// The GraphQL auth surface for one list: schema registration plus the
/// operations the host's execution engine dispatches to.
pub struct GqlAuthExtension {
    list_key: ListKey,
    identity_field: String,
    auto_create: bool,
    names: GqlNames,
    session: Option<Arc<dyn SessionStrategy>>,
}

impl GqlAuthExtension {
    #[must_use]
    pub fn new(config: &AuthConfig, session: Option<Arc<dyn SessionStrategy>>) -> Self {
        Self {
            list_key: config.list_key().clone(),
            identity_field: config.identity_field().to_owned(),
            auto_create: config.auto_create(),
            names: gql_names(config.list_key()),
            session,
        }
    }

    #[must_use]
    pub fn names(&self) -> &GqlNames {
        &self.names
    }

    /// The schema transformation registering this list's auth operations.
    ///
    /// The initial-item mutation is only registered when auto-create is on.
    #[must_use]
    pub fn extension(&self) -> SchemaExtension {
        let names = self.names.clone();
        let list_key = self.list_key.clone();
        let identity_field = self.identity_field.clone();
        let auto_create = self.auto_create;

        Arc::new(move |schema: GraphqlSchema| {
            let mut schema = schema
                .with_type(
                    &names.item_authentication_with_password_success,
                    TypeDef::Object {
                        fields: vec![
                            FieldDef::new("item", format!("{list_key}!")),
                            FieldDef::new("sessionToken", "String!"),
                        ],
                    },
                )
                .with_type(
                    &names.item_authentication_with_password_failure,
                    TypeDef::Object {
                        fields: vec![FieldDef::new("message", "String!")],
                    },
                )
                .with_type(
                    &names.item_authentication_with_password_result,
                    TypeDef::Union {
                        members: vec![
                            names.item_authentication_with_password_success.clone(),
                            names.item_authentication_with_password_failure.clone(),
                        ],
                    },
                )
                .with_mutation(
                    FieldDef::new(
                        &names.authenticate_item_with_password,
                        &names.item_authentication_with_password_result,
                    )
                    .with_arg(&identity_field, "String!")
                    .with_arg("secret", "String!"),
                );

            if auto_create {
                schema = schema
                    .with_type(
                        &names.create_initial_input,
                        TypeDef::Input {
                            fields: vec![FieldDef::new(&identity_field, "String")],
                        },
                    )
                    .with_mutation(
                        FieldDef::new(&names.create_initial_item, format!("{list_key}!"))
                            .with_arg("data", format!("{}!", names.create_initial_input)),
                    );
            }

            schema
        })
    }

    /// Password authentication: look the item up by the identity field,
    /// verify the secret through the host's field system, and mint a
    /// session token.
    ///
    /// # Errors
    ///
    /// Collaborator faults propagate; [`AuthError::NoSessionStrategy`] when
    /// the host config carries no session strategy. Wrong credentials are
    /// NOT an error; they come back as [`PasswordAuthResult::Failure`].
    pub async fn authenticate(
        &self,
        query: &dyn ItemQuery,
        identity: &str,
        secret: &str,
    ) -> Result<PasswordAuthResult, HostError> {
        let Some(item) = query
            .find_one(&self.list_key, &self.identity_field, identity)
            .await?
        else {
            return Ok(PasswordAuthResult::Failure {
                message: AUTH_FAILURE_MESSAGE.into(),
            });
        };

        if !query.verify_secret(&self.list_key, &item.id, secret).await? {
            tracing::debug!(list = %self.list_key, item = %item.id, "secret verification failed");
            return Ok(PasswordAuthResult::Failure {
                message: AUTH_FAILURE_MESSAGE.into(),
            });
        }

        let Some(session) = &self.session else {
            return Err(AuthError::NoSessionStrategy.into());
        };
        let session_token = session
            .start(ItemSession {
                list_key: self.list_key.clone(),
                item_id: item.id.clone(),
                data: item.data.clone(),
            })
            .await?;

        tracing::info!(list = %self.list_key, item = %item.id, "password authentication succeeded");
        Ok(PasswordAuthResult::Success {
            item,
            session_token,
        })
    }

    /// Create the first item of the list, bypassing access control.
    ///
    /// # Errors
    ///
    /// [`AuthError::AutoCreateDisabled`] unless auto-create is configured;
    /// [`AuthError::AlreadyInitialized`] when the list has items; data-layer
    /// faults propagate.
    pub async fn create_initial(
        &self,
        query: &dyn ItemQuery,
        data: JsonValue,
    ) -> Result<Item, HostError> {
        if !self.auto_create {
            return Err(AuthError::AutoCreateDisabled.into());
        }

        let count = query.count_privileged(&self.list_key).await?;
        if count != 0 {
            return Err(AuthError::AlreadyInitialized(self.list_key.clone()).into());
        }

        let item = query.create_privileged(&self.list_key, data).await?;
        tracing::info!(list = %self.list_key, item = %item.id, "initial item created");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{MemoryItems, MemorySessions};

    fn config() -> AuthConfig {
        AuthConfig::new("User", "email")
    }

    fn seeded_items() -> std::sync::Arc<MemoryItems> {
        let items = MemoryItems::empty();
        items.add(
            "User",
            "u1",
            json!({ "id": "u1", "email": "ada@example.com" }),
            "correct horse",
        );
        items
    }

    #[test]
    fn names_are_a_pure_function_of_the_list_key() {
        let names = gql_names(&ListKey::from("User"));
        assert_eq!(names.authenticate_item_with_password, "authenticateUserWithPassword");
        assert_eq!(
            names.item_authentication_with_password_result,
            "UserAuthenticationWithPasswordResult"
        );
        assert_eq!(
            names.item_authentication_with_password_success,
            "UserAuthenticationWithPasswordSuccess"
        );
        assert_eq!(
            names.item_authentication_with_password_failure,
            "UserAuthenticationWithPasswordFailure"
        );
        assert_eq!(names.create_initial_item, "createInitialUser");
        assert_eq!(names.create_initial_input, "CreateInitialUserInput");

        assert_eq!(gql_names(&ListKey::from("User")), gql_names(&ListKey::from("User")));
    }

    #[test]
    fn extension_registers_the_auth_surface() {
        let ext = GqlAuthExtension::new(&config(), None);
        let schema = (ext.extension())(GraphqlSchema::new());

        assert!(schema.has_type("UserAuthenticationWithPasswordSuccess"));
        assert!(schema.has_type("UserAuthenticationWithPasswordFailure"));
        assert!(schema.has_type("UserAuthenticationWithPasswordResult"));

        let auth = schema.mutation("authenticateUserWithPassword").unwrap();
        assert_eq!(auth.field_type, "UserAuthenticationWithPasswordResult");
        assert_eq!(
            auth.arguments,
            vec![
                ("email".to_string(), "String!".to_string()),
                ("secret".to_string(), "String!".to_string()),
            ]
        );

        // Auto-create off: no initial-item surface.
        assert!(schema.mutation("createInitialUser").is_none());
        assert!(!schema.has_type("CreateInitialUserInput"));
    }

    #[test]
    fn extension_registers_create_initial_when_auto_create_is_on() {
        let ext = GqlAuthExtension::new(&config().with_auto_create(true), None);
        let schema = (ext.extension())(GraphqlSchema::new());

        assert!(schema.has_type("CreateInitialUserInput"));
        let create = schema.mutation("createInitialUser").unwrap();
        assert_eq!(create.field_type, "User!");
        assert_eq!(
            create.arguments,
            vec![("data".to_string(), "CreateInitialUserInput!".to_string())]
        );
    }

    #[tokio::test]
    async fn authenticate_mints_a_session_on_success() {
        let sessions = MemorySessions::new();
        let ext = GqlAuthExtension::new(&config(), Some(sessions.clone()));
        let items = seeded_items();

        let result = ext
            .authenticate(items.as_ref(), "ada@example.com", "correct horse")
            .await
            .unwrap();

        let PasswordAuthResult::Success { item, session_token } = result else {
            panic!("expected success, got {result:?}");
        };
        assert_eq!(item.id.to_string(), "u1");
        assert_eq!(session_token.to_string(), "token-1");
        assert_eq!(sessions.started().len(), 1);
        assert_eq!(sessions.started()[0].item_id.to_string(), "u1");
    }

    #[tokio::test]
    async fn unknown_identity_and_wrong_secret_fail_identically() {
        let ext = GqlAuthExtension::new(&config(), Some(MemorySessions::new()));
        let items = seeded_items();

        let unknown = ext
            .authenticate(items.as_ref(), "nobody@example.com", "correct horse")
            .await
            .unwrap();
        let wrong = ext
            .authenticate(items.as_ref(), "ada@example.com", "battery staple")
            .await
            .unwrap();

        assert_eq!(unknown, wrong);
        let PasswordAuthResult::Failure { message } = unknown else {
            panic!("expected failure");
        };
        assert_eq!(message, "Authentication failed.");
    }

    #[tokio::test]
    async fn authenticate_without_session_strategy_is_a_wiring_fault() {
        let ext = GqlAuthExtension::new(&config(), None);
        let items = seeded_items();

        let err = ext
            .authenticate(items.as_ref(), "ada@example.com", "correct horse")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no session strategy"));
    }

    #[tokio::test]
    async fn create_initial_requires_auto_create() {
        let ext = GqlAuthExtension::new(&config(), None);
        let err = ext
            .create_initial(MemoryItems::empty().as_ref(), json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }

    #[tokio::test]
    async fn create_initial_rejects_a_non_empty_list() {
        let ext = GqlAuthExtension::new(&config().with_auto_create(true), None);
        let err = ext
            .create_initial(seeded_items().as_ref(), json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already contains items"));
    }

    #[tokio::test]
    async fn create_initial_creates_the_first_item() {
        let ext = GqlAuthExtension::new(&config().with_auto_create(true), None);
        let items = MemoryItems::empty();

        let data = json!({ "email": "admin@example.com" });
        let item = ext.create_initial(items.as_ref(), data.clone()).await.unwrap();
        assert_eq!(item.data, data);
        assert_eq!(
            items.count_privileged(&ListKey::from("User")).await.unwrap(),
            1
        );
    }
}
