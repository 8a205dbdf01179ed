use courier_core::{AttachmentMap, OutboundEmail};
use serde::Serialize;

use crate::config::RelayConfig;

/// Request body accepted by the relay's `/send/` endpoint.
#[derive(Debug, Serialize)]
pub struct RelayPayload<'a> {
    #[serde(rename = "host_smtp")]
    pub smtp_host: &'a str,
    #[serde(rename = "usuario_smtp")]
    pub smtp_username: &'a str,
    #[serde(rename = "senha_smtp")]
    pub smtp_password: &'a str,
    #[serde(rename = "emailRemetente")]
    pub sender_address: &'a str,
    #[serde(rename = "nomeRemetente")]
    pub sender_name: &'a str,
    #[serde(rename = "emailReply")]
    pub reply_to: &'a str,
    #[serde(rename = "emailDestino")]
    pub recipients: &'a [String],
    #[serde(rename = "assunto")]
    pub subject: &'a str,
    #[serde(rename = "mensagem")]
    pub html_body: &'a str,
    #[serde(rename = "mensagemTipo")]
    pub body_type: &'a str,
    #[serde(rename = "mensagemEncoding")]
    pub body_encoding: &'a str,
    #[serde(rename = "mensagemAlt")]
    pub text_body: &'a str,
    #[serde(rename = "mensagemAnexos")]
    pub attachments: &'a AttachmentMap,
}

impl<'a> RelayPayload<'a> {
    pub fn new(config: &'a RelayConfig, email: &'a OutboundEmail) -> Self {
        Self {
            smtp_host: &config.smtp_host,
            smtp_username: &config.smtp_username,
            smtp_password: &config.smtp_password,
            sender_address: &config.sender_address,
            sender_name: &config.sender_name,
            reply_to: &email.reply_to,
            recipients: &email.recipients,
            subject: &email.subject,
            html_body: &email.html_body,
            body_type: &config.body_type,
            body_encoding: &config.body_encoding,
            text_body: &email.text_body,
            attachments: &email.attachments,
        }
    }
}
