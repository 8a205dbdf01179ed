//! Resilient HTTP transport shared by every outward call of the Courier
//! pipeline.
//!
//! A single [`ResilientTransport`] is built once per process and handed to
//! each component by reference. It owns the pooled `reqwest` client and
//! applies the retry policy: responses with a retryable status (500, 502,
//! 503, 504 by default) and connection failures are retried with capped
//! exponential backoff, up to a bounded number of attempts.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use courier_transport::{ResilientTransport, TransportConfig};
//! use reqwest::header::HeaderMap;
//!
//! # async fn example() -> Result<(), courier_transport::TransportError> {
//! let transport = ResilientTransport::new(TransportConfig::default())?;
//! let response = transport
//!     .send("https://api.example.com/graphql", &serde_json::json!({"query": "{ me }"}), &HeaderMap::new())
//!     .await?;
//! assert!(response.status().is_success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::ResilientTransport;
pub use config::TransportConfig;
pub use error::{FailureClass, TransportError};
pub use retry::RetryPolicy;
