//! Email-relay client for the Courier notification pipeline.
//!
//! The relay accepts a JSON document carrying SMTP connection parameters,
//! sender identity, recipients, bodies, and base64 attachments, and performs
//! the SMTP delivery itself. [`RelayClient`] implements
//! [`MailRelay`](courier_provider::MailRelay) on top of the shared transport.

pub mod client;
pub mod config;
pub mod types;

pub use client::RelayClient;
pub use config::RelayConfig;
pub use types::RelayPayload;
