//! Error handling for the console client.
//!
//! - **Error Categories**: high-level classification for retry decisions
//! - **Domain errors**: [`StreamError`] for SSE connections, [`QueryError`]
//!   for search requests, [`HttpError`](crate::traits::HttpError) for the
//!   transport
//! - **Unified error**: [`ClientError`] and the [`ClientResult`] alias
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout, dropped stream | Yes |
//! | Auth | 401 / 403 | No |
//! | Server | 5xx, non-zero envelope code | Yes |
//! | Client | Invalid query, bad URL, other 4xx | No |
//! | Configuration | Invalid settings | No |

mod category;
mod client_error;
mod query;
mod stream;

pub use category::ErrorCategory;
pub use client_error::{ClientError, ClientResult};
pub use query::QueryError;
pub use stream::StreamError;
