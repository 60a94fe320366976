//! Typed HTTP fetch: one request in, one typed result or one typed error out.
//!
//! # Overview
//! `RequestExecutor::fetch` resolves an `Endpoint` into a request, hands it to
//! an injected `Transport`, checks the status and decodes the JSON body into
//! the caller's type.
//!
//! # Design
//! - The executor is stateless apart from its transport and config provider.
//! - `build_request` / `parse_response` keep the I/O boundary explicit; `fetch`
//!   is those two around exactly one `Transport::execute`.
//! - No retries, caching or pagination. The caller decides what to do with an
//!   error.
//!
//! ```no_run
//! use serde::Deserialize;
//! use typed_fetch::{ApiConfig, Endpoint, RequestExecutor};
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = RequestExecutor::with_config(ApiConfig::from_env()?);
//! let endpoint = Endpoint::get("https://api.example.com/users").query("id", "42");
//! let user: User = executor.fetch(&endpoint).await?;
//! println!("{} {}", user.id, user.name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;

pub use client::{RequestExecutor, REQUEST_TIMEOUT};
pub use config::{ApiConfig, ConfigProvider};
pub use endpoint::Endpoint;
pub use error::{ConfigError, FetchError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
