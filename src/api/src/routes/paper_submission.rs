use crate::configuration::NotificationSettings;
use crate::domain::submission::{optional, text_field};
use crate::domain::{EmailClient, MissingFields, OutboundEmail, PaperSubmission, RequiredFields, Sender};
use crate::routes::{submitted, SubmissionError};
use crate::templates::{render, PaperSubmissionEmail};
use actix_web::{web, HttpResponse};
use anyhow::Context;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSubmissionFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub paper_title: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub journal_name: Option<String>,
    #[serde(default, rename = "paperID", alias = "paperId", deserialize_with = "text_field")]
    pub paper_id: Option<String>,
}

impl TryFrom<PaperSubmissionFormData> for PaperSubmission {
    type Error = MissingFields;

    fn try_from(value: PaperSubmissionFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();
        let submission = PaperSubmission {
            name: check.text("name", value.name),
            email: check.text("email", value.email),
            paper_title: check.text("paperTitle", value.paper_title),
            journal_name: check.text("journalName", value.journal_name),
            paper_id: optional(value.paper_id),
        };
        check.finish()?;
        Ok(submission)
    }
}

#[tracing::instrument(
    name = "Confirming a paper submission",
    skip(form, email_client, notifications)
)]
pub async fn confirm_paper_submission(
    form: web::Json<PaperSubmissionFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let submission = PaperSubmission::try_from(form.into_inner())?;

    let html = render(&PaperSubmissionEmail::new(
        &submission,
        &notifications.publishing_team_name,
        &notifications.publishing_team_email,
    ))?;
    let email = OutboundEmail::new(
        submission.email.as_str(),
        "Manuscript Submission Confirmation",
        html,
    )
    .from_sender(Sender::new(
        &notifications.publishing_team_name,
        &notifications.journal_inbox,
    ));

    email_client
        .send_email(email)
        .await
        .context("Failed to send the confirmation email")?;

    Ok(submitted("Confirmation email sent successfully"))
}
