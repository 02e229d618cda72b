use crate::configuration::NotificationSettings;
use crate::domain::conference_quote::{ConferenceDetails, Organiser, Person, RequestedServices};
use crate::domain::submission::{flag_field, optional, text_field};
use crate::domain::{
    ConferenceQuote, EmailClient, MissingFields, OutboundEmail, QuoteReference, RequiredFields,
    Sender,
};
use crate::routes::{quoted, SubmissionError};
use crate::templates::{render, ConferenceQuoteAdminEmail, ConferenceQuoteConfirmationEmail};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Local;

const PUBLISHING_SENDER_NAME: &str = "Adroid Publishing";

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceQuoteFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_first_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_last_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_email: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_affiliation: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_experience: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organiser_country: Option<String>,

    #[serde(default, deserialize_with = "text_field")]
    pub editor_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub editor_first_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub editor_last_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub editor_affiliation: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub editor_country: Option<String>,

    #[serde(default, deserialize_with = "text_field")]
    pub conference_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub abbreviated_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub other_subject: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub journal: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub conference_website: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub venue_address: Option<String>,

    #[serde(default, deserialize_with = "text_field")]
    pub articles_count: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub participants_count: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub further_info: Option<String>,

    #[serde(default, deserialize_with = "flag_field")]
    pub abstract_management: bool,
    #[serde(default, deserialize_with = "flag_field")]
    pub peer_review_management: bool,
    #[serde(default, deserialize_with = "flag_field")]
    pub online_hosting: bool,

    #[serde(default, deserialize_with = "text_field")]
    pub how_did_you_hear: Option<String>,
    #[serde(default, deserialize_with = "flag_field")]
    pub marketing_consent: bool,
}

impl TryFrom<ConferenceQuoteFormData> for ConferenceQuote {
    type Error = MissingFields;

    fn try_from(value: ConferenceQuoteFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();

        let first_name = check.text("organiserFirstName", value.organiser_first_name);
        let last_name = check.text("organiserLastName", value.organiser_last_name);
        let email = check.text("organiserEmail", value.organiser_email);
        let affiliation = check.text("organiserAffiliation", value.organiser_affiliation);
        let organiser = Organiser {
            person: Person {
                title: optional(value.organiser_title),
                first_name,
                last_name,
                affiliation,
                country: optional(value.organiser_country),
            },
            email,
            experience: optional(value.organiser_experience),
        };

        let editor = Person {
            title: optional(value.editor_title),
            first_name: check.text("editorFirstName", value.editor_first_name),
            last_name: check.text("editorLastName", value.editor_last_name),
            affiliation: check.text("editorAffiliation", value.editor_affiliation),
            country: optional(value.editor_country),
        };

        let conference = ConferenceDetails {
            title: check.text("conferenceTitle", value.conference_title),
            abbreviated_title: check.text("abbreviatedTitle", value.abbreviated_title),
            subject: optional(value.subject),
            other_subject: optional(value.other_subject),
            journal: check.text("journal", value.journal),
            website: optional(value.conference_website),
            start_date: optional(value.start_date),
            end_date: optional(value.end_date),
            venue_address: optional(value.venue_address),
        };

        let quote = ConferenceQuote {
            organiser,
            editor,
            conference,
            articles_count: check.text("articlesCount", value.articles_count),
            participants_count: check.text("participantsCount", value.participants_count),
            further_info: optional(value.further_info),
            services: RequestedServices {
                abstract_management: value.abstract_management,
                peer_review_management: value.peer_review_management,
                online_hosting: value.online_hosting,
            },
            how_did_you_hear: optional(value.how_did_you_hear),
            marketing_consent: value.marketing_consent,
        };

        check.finish()?;
        Ok(quote)
    }
}

#[tracing::instrument(
    name = "Requesting a conference quotation",
    skip(form, email_client, notifications),
    fields(quote_ref = tracing::field::Empty)
)]
pub async fn send_quotation(
    form: web::Json<ConferenceQuoteFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let quote = ConferenceQuote::try_from(form.into_inner())?;

    let quote_ref = QuoteReference::generate(QuoteReference::CONFERENCE_PREFIX);
    tracing::Span::current().record("quote_ref", quote_ref.as_str());
    let now = Local::now().naive_local();

    let admin_html = render(&ConferenceQuoteAdminEmail::new(&quote, &quote_ref, now))?;
    let confirmation_html = render(&ConferenceQuoteConfirmationEmail::new(
        &quote,
        &quote_ref,
        &notifications.publications_inbox,
        now,
    ))?;

    let sender = Sender::new(PUBLISHING_SENDER_NAME, &notifications.journal_inbox);
    let admin_email = OutboundEmail::new(
        notifications.publications_inbox.as_str(),
        format!(
            "Conference Quote Request: {} [{}]",
            quote.conference.title, quote_ref
        ),
        admin_html,
    )
    .from_sender(sender.clone());
    let confirmation_email = OutboundEmail::new(
        quote.organiser.email.as_str(),
        format!("Your Conference Quote Request - {}", quote_ref),
        confirmation_html,
    )
    .from_sender(sender);

    futures::try_join!(
        email_client.send_email(admin_email),
        email_client.send_email(confirmation_email)
    )
    .context("Failed to send the quotation emails")?;

    Ok(quoted("Quote request submitted successfully", &quote_ref))
}
