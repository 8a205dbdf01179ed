pub mod attachment;
pub mod config;
pub mod error;
pub mod message;
pub mod outcome;
pub mod recipient;
pub mod request;

pub use attachment::{Attachment, AttachmentKey, AttachmentMap};
pub use config::{DepartmentRoute, DispatchConfig, MessageTemplate, MimeTable};
pub use error::DispatchError;
pub use message::OutboundEmail;
pub use outcome::{DispatchOutcome, DispatchResponse, FAILURE_STATUS, ResponseMessage};
pub use recipient::RecipientSet;
pub use request::NotificationRequest;
