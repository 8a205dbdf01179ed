//! Workflow API client for the Courier notification pipeline.
//!
//! Implements [`WorkflowApi`](courier_provider::WorkflowApi) over the
//! workflow system's GraphQL endpoint: a `findRecords` query that collects
//! a company's contact emails and an `updateCardField` mutation that writes
//! the delivery status back onto the originating card.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use courier_transport::{ResilientTransport, TransportConfig};
//! use courier_workflow::{WorkflowClient, WorkflowConfig};
//!
//! let transport = ResilientTransport::new(TransportConfig::default()).unwrap();
//! let config = WorkflowConfig::new("pipefy-token")
//!     .with_contacts_table("zaSzaB-T");
//! let client = WorkflowClient::new(config, transport).unwrap();
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::WorkflowClient;
pub use config::WorkflowConfig;
pub use error::WorkflowError;
