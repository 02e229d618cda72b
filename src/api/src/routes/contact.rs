use crate::configuration::NotificationSettings;
use crate::domain::submission::text_field;
use crate::domain::{
    ConnectzQuery, ContactQuery, EmailClient, MissingFields, OutboundEmail, RequiredFields, Sender,
};
use crate::routes::{submitted, SubmissionError};
use crate::templates::{render, ConnectzQueryEmail, JournalQueryEmail};
use actix_web::{web, HttpResponse};
use anyhow::Context;

#[derive(serde::Deserialize)]
pub struct QueryFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub message: Option<String>,
}

impl TryFrom<QueryFormData> for ContactQuery {
    type Error = MissingFields;

    fn try_from(value: QueryFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();
        let query = ContactQuery {
            name: check.text("name", value.name),
            email: check.text("email", value.email),
            message: check.text("message", value.message),
        };
        check.finish()?;
        Ok(query)
    }
}

#[tracing::instrument(name = "Forwarding a journal query", skip(form, email_client, notifications))]
pub async fn send_query_email(
    form: web::Json<QueryFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let query = ContactQuery::try_from(form.into_inner())?;

    let html = render(&JournalQueryEmail::from(&query))?;
    let email = OutboundEmail::new(notifications.journal_inbox.as_str(), "New Query", html)
        .from_sender(Sender::new(&query.name, &notifications.journal_inbox));

    email_client
        .send_email(email)
        .await
        .context("Failed to send email")?;

    Ok(submitted("Email sent successfully"))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectzFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub message: Option<String>,
}

impl TryFrom<ConnectzFormData> for ConnectzQuery {
    type Error = MissingFields;

    fn try_from(value: ConnectzFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();
        let query = ConnectzQuery {
            first_name: check.text("firstName", value.first_name),
            last_name: check.text("lastName", value.last_name),
            email: check.text("email", value.email),
            organization: check.text("organization", value.organization),
            service: check.text("service", value.service),
            message: check.text("message", value.message),
        };
        check.finish()?;
        Ok(query)
    }
}

#[tracing::instrument(
    name = "Forwarding an Adroid Connectz query",
    skip(form, email_client, notifications)
)]
pub async fn send_connectz_query(
    form: web::Json<ConnectzFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let query = ConnectzQuery::try_from(form.into_inner())?;

    let html = render(&ConnectzQueryEmail::from(&query))?;
    let email = OutboundEmail::new(
        notifications.connectz_inbox.as_str(),
        "New Contact Form Submission - Adroid Connectz",
        html,
    )
    .from_sender(Sender::new(query.full_name(), &notifications.journal_inbox));

    email_client
        .send_email(email)
        .await
        .context("Failed to send email")?;

    Ok(submitted("Email sent successfully"))
}
