//! The auth composition itself.
//!
//! [`Auth::with_auth`] is the entry point: it validates the auth config
//! against the host config, then returns a new host config whose UI slots,
//! session strategy, and schema extension are the caller's originals with
//! auth behavior layered in. The pieces it wires up live here too: the
//! page-level decision engine, the bootstrap access carve-out, the session
//! augmentor, and the generated GraphQL surface.
//!
//! Per request, the host pipeline runs the page decision (and honors its
//! redirect) before session augmentation or any resolver executes.

mod access;
mod bootstrap;
mod config;
mod composer;
mod files;
mod schema;
mod session;

pub use composer::Auth;
pub use config::AuthConfig;
pub use schema::{gql_names, GqlAuthExtension, GqlNames, PasswordAuthResult};
