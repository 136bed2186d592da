// Floor-plan service API module.
// Provides client and types for interacting with the houses/floors/objects REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use endpoints::object_templates;
pub use types::*;
