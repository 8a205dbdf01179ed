//! Notification dispatch pipeline.
//!
//! Given a card event, the [`Dispatcher`] fetches and encodes the card's
//! attachments, resolves the company's recipients, composes the branded
//! message, submits it to the mail relay, and writes the delivery status
//! back onto the card. Every run ends in a single [`DispatchOutcome`]:
//! stage failures never escape as errors or panics.
//!
//! [`DispatchOutcome`]: courier_core::DispatchOutcome

pub mod attachments;
pub mod composer;
pub mod orchestrator;
pub mod recipients;

pub use attachments::{AttachmentError, AttachmentProcessor};
pub use composer::ComposedMessage;
pub use orchestrator::{Dispatcher, Stage};
pub use recipients::RecipientResolver;
