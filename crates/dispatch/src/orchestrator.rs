use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use courier_core::{
    DispatchConfig, DispatchError, DispatchOutcome, MessageTemplate, NotificationRequest,
    OutboundEmail,
};
use courier_provider::{FileSource, MailRelay, WorkflowApi};
use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use crate::attachments::AttachmentProcessor;
use crate::composer::compose;
use crate::recipients::RecipientResolver;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateInput,
    ProcessAttachments,
    ResolveRecipients,
    ComposeMessage,
    Send,
    Writeback,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidateInput => "validate_input",
            Self::ProcessAttachments => "process_attachments",
            Self::ResolveRecipients => "resolve_recipients",
            Self::ComposeMessage => "compose_message",
            Self::Send => "send",
            Self::Writeback => "writeback",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal error together with the stage that raised it.
#[derive(Debug)]
struct StageFailure {
    stage: Stage,
    error: DispatchError,
}

impl StageFailure {
    fn new(stage: Stage, error: DispatchError) -> Self {
        Self { stage, error }
    }
}

/// Runs one notification request through the whole pipeline.
///
/// Collaborators are injected as trait objects so the same dispatcher
/// works against live APIs, a dry-run relay, or test doubles. A dispatcher
/// is cheap to share and may serve any number of sequential or concurrent
/// runs; it keeps no state between them.
pub struct Dispatcher {
    config: DispatchConfig,
    workflow: Arc<dyn WorkflowApi>,
    relay: Arc<dyn MailRelay>,
    attachments: AttachmentProcessor,
    writeback: bool,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("relay", &self.relay.name())
            .field("writeback", &self.writeback)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        config: DispatchConfig,
        workflow: Arc<dyn WorkflowApi>,
        relay: Arc<dyn MailRelay>,
        files: Arc<dyn FileSource>,
    ) -> Self {
        let attachments = AttachmentProcessor::new(
            files,
            config.mime_types.clone(),
            config.max_concurrent_fetches,
        );
        Self {
            config,
            workflow,
            relay,
            attachments,
            writeback: true,
        }
    }

    /// Enable or disable the card status update after a send.
    ///
    /// Disable it when the relay does not really deliver (dry runs), so no
    /// false delivery record lands on the card.
    #[must_use]
    pub fn with_writeback(mut self, enabled: bool) -> Self {
        self.writeback = enabled;
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Parse a raw request document and dispatch it.
    pub async fn dispatch(&self, input: serde_json::Value) -> DispatchOutcome {
        match NotificationRequest::from_value(input) {
            Ok(request) => self.dispatch_request(&request).await,
            Err(err) => {
                error!(stage = %Stage::ValidateInput, error = %err, "dispatch failed");
                err.into()
            }
        }
    }

    /// Dispatch a parsed request. Never panics and never returns an error:
    /// every failure, including a panic in a collaborator, becomes
    /// [`DispatchOutcome::Failure`].
    #[instrument(skip_all, fields(card_id = %request.card_id, department = %request.department))]
    pub async fn dispatch_request(&self, request: &NotificationRequest) -> DispatchOutcome {
        match AssertUnwindSafe(self.run(request)).catch_unwind().await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(failure)) => {
                error!(stage = %failure.stage, error = %failure.error, "dispatch failed");
                failure.error.into()
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(panic = %message, "dispatch panicked");
                DispatchError::Internal(message).into()
            }
        }
    }

    async fn run(&self, request: &NotificationRequest) -> Result<DispatchOutcome, StageFailure> {
        debug!(stage = %Stage::ValidateInput, "entering stage");
        let urls = request.non_blank_urls();
        if urls.is_empty() {
            return Err(StageFailure::new(
                Stage::ValidateInput,
                DispatchError::NoFilesFound,
            ));
        }

        debug!(stage = %Stage::ProcessAttachments, urls = urls.len(), "entering stage");
        let attachments = self.attachments.process(&urls).await;
        if attachments.is_empty() {
            return Err(StageFailure::new(
                Stage::ProcessAttachments,
                DispatchError::NoAttachmentProcessed,
            ));
        }

        debug!(stage = %Stage::ResolveRecipients, "entering stage");
        let recipients = RecipientResolver::new(&self.config)
            .resolve(
                &request.company_name,
                &request.department,
                self.workflow.as_ref(),
            )
            .await;
        if recipients.is_empty() {
            return Err(StageFailure::new(
                Stage::ResolveRecipients,
                DispatchError::NoRecipientFound,
            ));
        }

        debug!(stage = %Stage::ComposeMessage, "entering stage");
        let message = compose(
            request,
            &request.attachment_urls,
            recipients.reply_to(),
            &self.config.template,
        );
        let attachment_keys: Vec<String> = attachments.keys().map(ToString::to_string).collect();
        let email = OutboundEmail {
            reply_to: recipients.reply_to().to_owned(),
            recipients: recipients.to_vec(),
            subject: request.subject.clone(),
            html_body: message.html,
            text_body: message.text,
            attachments,
        };

        debug!(stage = %Stage::Send, relay = self.relay.name(), "entering stage");
        let status_code = self
            .relay
            .send(&email)
            .await
            .map_err(|e| StageFailure::new(Stage::Send, DispatchError::Send(e.to_string())))?;
        info!(
            status_code,
            recipients = email.recipients.len(),
            attachments = attachment_keys.len(),
            "email sent"
        );

        self.write_back(&request.card_id, &email.recipients).await;

        debug!(stage = %Stage::Done, "entering stage");
        Ok(DispatchOutcome::Success {
            status_code,
            recipients: email.recipients,
            attachment_keys,
        })
    }

    /// Record delivery on the card. Failures are logged only: the message
    /// has already been accepted by the relay.
    async fn write_back(&self, card_id: &str, recipients: &[String]) {
        debug!(stage = %Stage::Writeback, "entering stage");
        if !self.writeback {
            info!(card_id, "writeback disabled, card left unchanged");
            return;
        }
        if card_id.trim().is_empty() {
            warn!("request has no card id, skipping writeback");
            return;
        }

        let offset = self
            .config
            .writeback_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!(
                    hours = self.config.writeback_utc_offset_hours,
                    "invalid writeback offset, using UTC"
                );
                Utc.fix()
            });
        let now = Utc::now().with_timezone(&offset);
        let line = status_line(recipients, &now, &self.config.template);

        match self.workflow.update_card_status(card_id, &line).await {
            Ok(()) => info!(card_id, "card status updated"),
            Err(err) => warn!(card_id, error = %err, "card status update failed"),
        }
    }
}

/// The delivery summary written onto the card.
pub fn status_line(
    recipients: &[String],
    sent_at: &DateTime<FixedOffset>,
    template: &MessageTemplate,
) -> String {
    format!(
        "{} {}. {} {}",
        template.writeback_sent_to,
        recipients.join(", "),
        template.writeback_sent_at,
        sent_at.format(&template.writeback_time_format)
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "stage panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stage_names() {
        assert_eq!(Stage::ValidateInput.to_string(), "validate_input");
        assert_eq!(Stage::Writeback.as_str(), "writeback");
    }

    #[test]
    fn status_line_format() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let sent_at = offset.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let line = status_line(
            &["a@x.com".to_owned(), "b@x.com".to_owned()],
            &sent_at,
            &MessageTemplate::default(),
        );
        assert_eq!(
            line,
            "📧 Email enviado com sucesso para os destinatários: a@x.com, b@x.com. \
             ⏰ Enviado em: 07/03/2024 09:05:01"
        );
    }

    #[test]
    fn panic_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "stage panicked");
    }
}
