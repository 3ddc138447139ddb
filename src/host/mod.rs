//! The host framework's side of the contract.
//!
//! Lattice owns the config shape, the data layer, the GraphQL engine, the
//! session back end, and the transport. This module pins down the narrow
//! slice of each that the auth composition reads or wraps: config slots,
//! the inbound request surface, and the capability traits a host (or the
//! identity-provider library) implements.

mod config;
mod graphql;
mod request;
mod traits;

pub use config::{HostConfig, ListConfig, UiConfig};
pub use graphql::{FieldDef, GraphqlSchema, SchemaExtension, TypeDef};
pub use request::{Request, RequestContext};
pub use traits::{
    AccessPredicate, AdditionalFilesFn, GeneratedFile, IdentityProvider, ItemQuery,
    PageMiddleware, ProviderSession, Redirect, SessionStrategy,
};
