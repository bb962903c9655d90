//! Console Client - typed query model and SSE streaming client for an admin
//! console REST backend.
//!
//! - [`query`] builds and validates structured search requests
//! - [`sse`] reads server-sent event streams with cancellation
//! - [`api`] sends JSON requests and unwraps the backend envelope

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod sse;
pub mod traits;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
