//! Evaluation API Client
//!
//! A pre-configured HTTP client bound to the evaluation backend.
//!
//! - **config**: Base URL, default headers, per-request overrides and URL
//!   resolution (shared with the browser front-end)
//! - **http**: The `reqwest`-backed [`ApiClient`]
//! - **evaluation**: Typed calls for the evaluation endpoints
//! - **error**: Client errors
//!
//! Every request inherits the base URL and the default headers unless the
//! call site overrides them. The client never retries and sets no timeout;
//! failures are returned to the caller as they happen.
//!
//! # Example
//!
//! ```rust,no_run
//! use digital_economy::client::{ApiClient, ClientConfig, EvaluationApi};
//! use digital_economy::Subsystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let api = EvaluationApi::new(client);
//!
//!     let overall = api.overall().await?;
//!     println!("synergy: {}", overall.evaluation(Subsystem::Collaborative));
//!     Ok(())
//! }
//! ```

pub mod config;

#[cfg(feature = "native")]
pub mod error;
#[cfg(feature = "native")]
pub mod evaluation;
#[cfg(feature = "native")]
pub mod http;

pub use config::{resolve_url, ClientConfig, RequestOverrides, DEFAULT_BASE_URL};

#[cfg(feature = "native")]
pub use error::{ClientError, ClientResult};
#[cfg(feature = "native")]
pub use evaluation::EvaluationApi;
#[cfg(feature = "native")]
pub use http::ApiClient;
