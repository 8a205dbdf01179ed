use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Status code reported for every failed dispatch.
pub const FAILURE_STATUS: u16 = 500;

/// Terminal result of a single dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The relay accepted the message.
    Success {
        /// Status code returned by the relay.
        status_code: u16,
        /// Addresses the message was sent to.
        recipients: Vec<String>,
        /// Keys of the attachments included (`file1`, ...).
        attachment_keys: Vec<String>,
    },
    /// The run stopped before the message was accepted.
    Failure {
        /// Human-readable reason.
        reason: String,
    },
}

impl DispatchOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP-equivalent status: the relay's code on success, 500 on failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } => *status_code,
            Self::Failure { .. } => FAILURE_STATUS,
        }
    }

    /// Render the caller-facing result document.
    pub fn to_response(&self) -> DispatchResponse {
        match self {
            Self::Success {
                status_code,
                recipients,
                attachment_keys,
            } => DispatchResponse {
                status_code: *status_code,
                message: ResponseMessage {
                    kind: "E-mail sent successfully".to_owned(),
                    message_text: format!(
                        "E-mail sent to: {} with attachments: [{}]",
                        recipients.join(", "),
                        attachment_keys.join(", ")
                    ),
                },
            },
            Self::Failure { reason } => DispatchResponse {
                status_code: FAILURE_STATUS,
                message: ResponseMessage {
                    kind: "Failed to send e-mail".to_owned(),
                    message_text: reason.clone(),
                },
            },
        }
    }
}

impl From<DispatchError> for DispatchOutcome {
    fn from(err: DispatchError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Caller-facing result document: `{status_code, message: {type, message_text}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub status_code: u16,
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub message_text: String,
}
