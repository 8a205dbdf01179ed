pub mod error;
pub mod log;
pub mod relay;
pub mod source;
pub mod workflow;

pub use error::ProviderError;
pub use log::LogRelay;
pub use relay::MailRelay;
pub use source::{FileSource, HttpFileSource};
pub use workflow::WorkflowApi;
