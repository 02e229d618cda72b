use crate::domain::{Attachment, DispatchError, EmailClient, OutboundEmail, Recipient, Sender};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Sends mail through Brevo's transactional email API (`POST /v3/smtp/email`).
#[derive(Clone)]
pub struct BrevoEmailClient {
    http_client: Client,
    base_url: String,
    default_sender: Sender,
    api_key: Secret<String>,
}

impl BrevoEmailClient {
    pub fn new(
        base_url: String,
        default_sender: Sender,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            default_sender,
            api_key,
        })
    }
}

#[async_trait]
impl EmailClient for BrevoEmailClient {
    #[tracing::instrument(
        name = "Dispatching email through Brevo",
        skip(self, email),
        fields(subject = %email.subject, attachments = email.attachments.len())
    )]
    async fn send_email(&self, email: OutboundEmail) -> Result<(), DispatchError> {
        let recipients = email.to.into_records();
        if let Some(invalid) = recipients
            .iter()
            .find(|recipient| !validator::validate_email(recipient.email.as_str()))
        {
            return Err(DispatchError::InvalidRecipient(invalid.email.clone()));
        }

        let sender = email.sender.unwrap_or_else(|| self.default_sender.clone());
        let url = format!("{}/v3/smtp/email", self.base_url.trim_end_matches('/'));
        let request_body = SendEmailRequest {
            sender: Contact::from(&sender),
            to: recipients.iter().map(Contact::from).collect(),
            subject: &email.subject,
            html_content: &email.html_content,
            attachment: email.attachments.iter().map(EncodedAttachment::from).collect(),
        };

        self.http_client
            .post(&url)
            .header("api-key", self.api_key.expose_secret())
            .header("accept", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DispatchError::Rejected(e.into()))?
            .error_for_status()
            .map_err(|e| DispatchError::Rejected(e.into()))?;

        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachment: Vec<EncodedAttachment<'a>>,
}

#[derive(serde::Serialize)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Sender> for Contact<'a> {
    fn from(sender: &'a Sender) -> Self {
        Self {
            email: &sender.email,
            name: Some(&sender.name),
        }
    }
}

impl<'a> From<&'a Recipient> for Contact<'a> {
    fn from(recipient: &'a Recipient) -> Self {
        Self {
            email: &recipient.email,
            name: recipient.name.as_deref(),
        }
    }
}

#[derive(serde::Serialize)]
struct EncodedAttachment<'a> {
    name: &'a str,
    content: String,
}

impl<'a> From<&'a Attachment> for EncodedAttachment<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            name: &attachment.file_name,
            content: STANDARD.encode(&attachment.content),
        }
    }
}
