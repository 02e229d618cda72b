//! Notification email bodies. Every interpolated value is HTML-escaped by askama.

use crate::domain::conference_quote::ConferenceQuote;
use crate::domain::display_date::submission_timestamp;
use crate::domain::{
    AgreementRequest, BookProposal, ConnectzQuery, ContactQuery, CopyrightForm, PaperSubmission,
    QuoteReference,
};
use anyhow::Context;
use askama::Template;
use chrono::{Datelike, NaiveDateTime};

pub fn render(template: &impl Template) -> Result<String, anyhow::Error> {
    template
        .render()
        .context("Failed to render the email template")
}

#[derive(Template)]
#[template(path = "emails/journal_query.html")]
pub struct JournalQueryEmail {
    name: String,
    email: String,
    message: String,
}

impl From<&ContactQuery> for JournalQueryEmail {
    fn from(query: &ContactQuery) -> Self {
        Self {
            name: query.name.clone(),
            email: query.email.clone(),
            message: query.message.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/connectz_query.html")]
pub struct ConnectzQueryEmail {
    first_name: String,
    last_name: String,
    email: String,
    organization: String,
    service: String,
    message: String,
}

impl From<&ConnectzQuery> for ConnectzQueryEmail {
    fn from(query: &ConnectzQuery) -> Self {
        Self {
            first_name: query.first_name.clone(),
            last_name: query.last_name.clone(),
            email: query.email.clone(),
            organization: query.organization.clone(),
            service: query.service.clone(),
            message: query.message.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/paper_submission.html")]
pub struct PaperSubmissionEmail {
    name: String,
    email: String,
    paper_title: String,
    journal_name: String,
    paper_id: Option<String>,
    contact_email: String,
    team_name: String,
}

impl PaperSubmissionEmail {
    pub fn new(submission: &PaperSubmission, team_name: &str, contact_email: &str) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            paper_title: submission.paper_title.clone(),
            journal_name: submission.journal_name.clone(),
            paper_id: submission.paper_id.clone(),
            contact_email: contact_email.to_string(),
            team_name: team_name.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/copyright_form.html")]
pub struct CopyrightFormEmail {
    name: String,
    email: String,
    paper_id: String,
    title: String,
    journal_name: Option<String>,
    file_name: String,
}

impl From<&CopyrightForm> for CopyrightFormEmail {
    fn from(form: &CopyrightForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            paper_id: form.paper_id.clone(),
            title: form.title.clone(),
            journal_name: form.journal_name.clone(),
            file_name: form.signed_form.file_name.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/publishing_agreement.html")]
pub struct PublishingAgreementEmail {
    name: String,
    paper_id: String,
    title: String,
    agreement_link: String,
    contact_email: String,
    team_name: String,
}

impl PublishingAgreementEmail {
    pub fn new(
        request: &AgreementRequest,
        agreement_base_url: &str,
        team_name: &str,
        contact_email: &str,
    ) -> Self {
        Self {
            name: request.name.clone().unwrap_or_default(),
            paper_id: request.paper_id.clone(),
            title: request.title.clone(),
            agreement_link: request.agreement_link(agreement_base_url),
            contact_email: contact_email.to_string(),
            team_name: team_name.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/conference_quote_admin.html")]
pub struct ConferenceQuoteAdminEmail {
    quote_ref: String,
    organiser_name: String,
    organiser_email: String,
    organiser_affiliation: String,
    organiser_country: String,
    organiser_experience: Option<String>,
    editor_name: String,
    editor_affiliation: String,
    editor_country: String,
    conference_title: String,
    abbreviated_title: String,
    subject_line: String,
    journal: String,
    website: Option<String>,
    date_range: String,
    venue_address: String,
    articles_count: String,
    participants_count: String,
    further_info: String,
    abstract_management: bool,
    peer_review_management: bool,
    online_hosting: bool,
    how_did_you_hear: String,
    marketing_consent: bool,
    submitted_at: String,
    year: i32,
}

impl ConferenceQuoteAdminEmail {
    pub fn new(quote: &ConferenceQuote, quote_ref: &QuoteReference, now: NaiveDateTime) -> Self {
        let organiser = &quote.organiser;
        let conference = &quote.conference;
        Self {
            quote_ref: quote_ref.to_string(),
            organiser_name: organiser.person.display_name(),
            organiser_email: organiser.email.clone(),
            organiser_affiliation: organiser.person.affiliation.clone(),
            organiser_country: organiser.person.country.clone().unwrap_or_default(),
            organiser_experience: organiser.experience.clone(),
            editor_name: quote.editor.display_name(),
            editor_affiliation: quote.editor.affiliation.clone(),
            editor_country: quote.editor.country.clone().unwrap_or_default(),
            conference_title: conference.title.clone(),
            abbreviated_title: conference.abbreviated_title.clone(),
            subject_line: conference.subject_line(),
            journal: conference.journal.clone(),
            website: conference.website.clone(),
            date_range: conference.date_range(),
            venue_address: conference.venue_address.clone().unwrap_or_default(),
            articles_count: quote.articles_count.clone(),
            participants_count: quote.participants_count.clone(),
            further_info: quote.further_info.clone().unwrap_or_default(),
            abstract_management: quote.services.abstract_management,
            peer_review_management: quote.services.peer_review_management,
            online_hosting: quote.services.online_hosting,
            how_did_you_hear: quote.how_did_you_hear.clone().unwrap_or_default(),
            marketing_consent: quote.marketing_consent,
            submitted_at: submission_timestamp(now),
            year: now.year(),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/conference_quote_confirmation.html")]
pub struct ConferenceQuoteConfirmationEmail {
    quote_ref: String,
    organiser_name: String,
    organiser_email: String,
    conference_title: String,
    contact_email: String,
    marketing_consent: bool,
    year: i32,
}

impl ConferenceQuoteConfirmationEmail {
    pub fn new(
        quote: &ConferenceQuote,
        quote_ref: &QuoteReference,
        contact_email: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            quote_ref: quote_ref.to_string(),
            organiser_name: quote.organiser.person.display_name(),
            organiser_email: quote.organiser.email.clone(),
            conference_title: quote.conference.title.clone(),
            contact_email: contact_email.to_string(),
            marketing_consent: quote.marketing_consent,
            year: now.year(),
        }
    }
}

pub struct EditorRow {
    pub name: String,
    pub affiliation: String,
    pub email: String,
    pub bio: String,
}

#[derive(Template)]
#[template(path = "emails/book_quote_admin.html")]
pub struct BookQuoteAdminEmail {
    quote_ref: String,
    book_title: String,
    about_book: String,
    scope: String,
    editors: Vec<EditorRow>,
    chapters: Vec<String>,
    promotion_plan: String,
    target_audience: String,
    submitted_at: String,
}

impl BookQuoteAdminEmail {
    pub fn new(proposal: &BookProposal, quote_ref: &QuoteReference, now: NaiveDateTime) -> Self {
        Self {
            quote_ref: quote_ref.to_string(),
            book_title: proposal.book_title.clone(),
            about_book: proposal.about_book.clone(),
            scope: proposal.scope.clone(),
            editors: proposal
                .editors
                .iter()
                .map(|editor| EditorRow {
                    name: editor.name.clone(),
                    affiliation: editor.affiliation.clone(),
                    email: editor.email.clone(),
                    bio: editor.bio.clone(),
                })
                .collect(),
            chapters: proposal.chapters.clone(),
            promotion_plan: proposal.promotion_plan.clone().unwrap_or_default(),
            target_audience: proposal.target_audience.clone().unwrap_or_default(),
            submitted_at: submission_timestamp(now),
        }
    }
}

#[derive(Template)]
#[template(path = "emails/book_quote_confirmation.html")]
pub struct BookQuoteConfirmationEmail {
    quote_ref: String,
    editor_name: String,
    book_title: String,
    contact_email: String,
}

impl BookQuoteConfirmationEmail {
    pub fn new(proposal: &BookProposal, quote_ref: &QuoteReference, contact_email: &str) -> Self {
        Self {
            quote_ref: quote_ref.to_string(),
            editor_name: proposal
                .primary_editor()
                .map(|editor| editor.name.clone())
                .unwrap_or_default(),
            book_title: proposal.book_title.clone(),
            contact_email: contact_email.to_string(),
        }
    }
}
