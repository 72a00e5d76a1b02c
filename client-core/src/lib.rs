//! client-core: Shared infrastructure for the lending app client crates.
pub mod config;
pub mod error;
pub mod observability;

pub use error::ClientError;
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;
