use crate::routes::error_chain_fmt;
use async_trait::async_trait;

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("{0} is not a valid recipient address")]
    InvalidRecipient(String),
    #[error("The email provider rejected the message")]
    Rejected(#[source] anyhow::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Gateway to the transactional email provider. One call, one delivery attempt.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, email: OutboundEmail) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// Either a bare address or an explicit list of recipient records.
#[derive(Debug, Clone)]
pub enum Recipients {
    Single(String),
    Many(Vec<Recipient>),
}

impl Recipients {
    pub fn into_records(self) -> Vec<Recipient> {
        match self {
            Recipients::Single(email) => vec![Recipient::new(email)],
            Recipients::Many(records) => records,
        }
    }
}

impl From<&str> for Recipients {
    fn from(email: &str) -> Self {
        Recipients::Single(email.to_string())
    }
}

impl From<String> for Recipients {
    fn from(email: String) -> Self {
        Recipients::Single(email)
    }
}

impl From<Vec<Recipient>> for Recipients {
    fn from(records: Vec<Recipient>) -> Self {
        Recipients::Many(records)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub email: String,
}

impl Sender {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("size", &self.content.len())
            .finish()
    }
}

/// A message ready for dispatch. When `sender` is `None` the gateway's
/// configured default identity is used.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Recipients,
    pub subject: String,
    pub html_content: String,
    pub sender: Option<Sender>,
    pub attachments: Vec<Attachment>,
}

impl OutboundEmail {
    pub fn new(
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        html_content: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_content: html_content.into(),
            sender: None,
            attachments: vec![],
        }
    }

    pub fn from_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}
