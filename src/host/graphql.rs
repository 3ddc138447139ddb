use std::collections::BTreeMap;
use std::sync::Arc;

/// A named field: output field on an object type, or a top-level
/// query/mutation with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub arguments: Vec<(String, String)>,
    pub field_type: String,
}

impl FieldDef {
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            field_type: field_type.into(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, arg_type: impl Into<String>) -> Self {
        self.arguments.push((name.into(), arg_type.into()));
        self
    }
}

/// A named type registered in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Object { fields: Vec<FieldDef> },
    Input { fields: Vec<FieldDef> },
    Union { members: Vec<String> },
}

/// Declarative view of the host's GraphQL schema.
///
/// The host's execution engine owns resolver wiring; extensions registered
/// against this value only declare names, arguments, and shapes. Registering
/// a name that already exists replaces the earlier entry and logs a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphqlSchema {
    pub types: BTreeMap<String, TypeDef>,
    pub queries: BTreeMap<String, FieldDef>,
    pub mutations: BTreeMap<String, FieldDef>,
}

impl GraphqlSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, def: TypeDef) -> Self {
        let name = name.into();
        if self.types.insert(name.clone(), def).is_some() {
            tracing::warn!(type_name = %name, "schema extension replaced an existing type");
        }
        self
    }

    #[must_use]
    pub fn with_query(mut self, field: FieldDef) -> Self {
        if let Some(prev) = self.queries.insert(field.name.clone(), field) {
            tracing::warn!(field = %prev.name, "schema extension replaced an existing query");
        }
        self
    }

    #[must_use]
    pub fn with_mutation(mut self, field: FieldDef) -> Self {
        if let Some(prev) = self.mutations.insert(field.name.clone(), field) {
            tracing::warn!(field = %prev.name, "schema extension replaced an existing mutation");
        }
        self
    }

    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn mutation(&self, name: &str) -> Option<&FieldDef> {
        self.mutations.get(name)
    }
}

/// A transformation adding types and fields to an existing schema.
///
/// Composition is ordered function application: when the caller already has
/// an extension, it runs first and the next extension sees its output.
pub type SchemaExtension = Arc<dyn Fn(GraphqlSchema) -> GraphqlSchema + Send + Sync>;
