use crate::configuration::NotificationSettings;
use crate::domain::book_proposal::MINIMUM_CHAPTERS;
use crate::domain::submission::{optional, text_field};
use crate::domain::{
    BookEditor, BookProposal, EmailClient, MissingFields, OutboundEmail, QuoteReference,
    RequiredFields, Sender,
};
use crate::routes::{quoted, SubmissionError};
use crate::templates::{render, BookQuoteAdminEmail, BookQuoteConfirmationEmail};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Local;

const PUBLISHING_SENDER_NAME: &str = "Adroid Publishing";

#[derive(serde::Deserialize)]
pub struct EditorFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub affiliation: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub bio: Option<String>,
}

impl From<EditorFormData> for BookEditor {
    fn from(value: EditorFormData) -> Self {
        Self {
            name: optional(value.name).unwrap_or_default(),
            affiliation: optional(value.affiliation).unwrap_or_default(),
            email: optional(value.email).unwrap_or_default(),
            bio: optional(value.bio).unwrap_or_default(),
        }
    }
}

/// A chapter arrives either as `{"title": ...}` or as a bare string.
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub enum ChapterFormData {
    Titled {
        #[serde(default, deserialize_with = "text_field")]
        title: Option<String>,
    },
    Plain(String),
}

impl From<ChapterFormData> for String {
    fn from(value: ChapterFormData) -> Self {
        match value {
            ChapterFormData::Titled { title } => optional(title).unwrap_or_default(),
            ChapterFormData::Plain(title) => title.trim().to_string(),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookProposalFormData {
    #[serde(default)]
    pub editors: Vec<EditorFormData>,
    #[serde(default, deserialize_with = "text_field")]
    pub book_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub about_book: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub scope: Option<String>,
    #[serde(default)]
    pub chapters: Vec<ChapterFormData>,
    #[serde(default, deserialize_with = "text_field")]
    pub promotion_plan: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub target_audience: Option<String>,
}

impl TryFrom<BookProposalFormData> for BookProposal {
    type Error = MissingFields;

    fn try_from(value: BookProposalFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();

        let editors: Vec<BookEditor> = check
            .list("editors", value.editors, 1)
            .into_iter()
            .map(BookEditor::from)
            .collect();
        if let Some(primary) = editors.first() {
            check.require("editors[0].email", !primary.email.is_empty());
        }

        let proposal = BookProposal {
            editors,
            book_title: check.text("bookTitle", value.book_title),
            about_book: check.text("aboutBook", value.about_book),
            scope: check.text("scope", value.scope),
            chapters: check
                .list("chapters", value.chapters, MINIMUM_CHAPTERS)
                .into_iter()
                .map(String::from)
                .collect(),
            promotion_plan: optional(value.promotion_plan),
            target_audience: optional(value.target_audience),
        };

        check.finish()?;
        Ok(proposal)
    }
}

#[tracing::instrument(
    name = "Requesting a book series quotation",
    skip(form, email_client, notifications),
    fields(quote_ref = tracing::field::Empty)
)]
pub async fn send_book_quotation(
    form: web::Json<BookProposalFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let proposal = BookProposal::try_from(form.into_inner())?;
    let primary_editor = proposal
        .primary_editor()
        .map(|editor| editor.email.clone())
        .ok_or(MissingFields(vec!["editors"]))?;

    let quote_ref = QuoteReference::generate(QuoteReference::BOOK_SERIES_PREFIX);
    tracing::Span::current().record("quote_ref", quote_ref.as_str());
    let now = Local::now().naive_local();

    let admin_html = render(&BookQuoteAdminEmail::new(&proposal, &quote_ref, now))?;
    let confirmation_html = render(&BookQuoteConfirmationEmail::new(
        &proposal,
        &quote_ref,
        &notifications.publications_inbox,
    ))?;

    let sender = Sender::new(PUBLISHING_SENDER_NAME, &notifications.journal_inbox);
    let admin_email = OutboundEmail::new(
        notifications.publications_inbox.as_str(),
        format!(
            "Book Series Quote Request: {} [{}]",
            proposal.book_title, quote_ref
        ),
        admin_html,
    )
    .from_sender(sender.clone());
    let confirmation_email = OutboundEmail::new(
        primary_editor,
        format!("Your Book Proposal Submission \u{2013} {}", quote_ref),
        confirmation_html,
    )
    .from_sender(sender);

    futures::try_join!(
        email_client.send_email(admin_email),
        email_client.send_email(confirmation_email)
    )
    .context("Failed to process book quotation request")?;

    Ok(quoted("Book proposal submitted successfully", &quote_ref))
}
