use crate::configuration::{NotificationSettings, UploadSettings};
use crate::domain::submission::{optional, text_field};
use crate::domain::{
    AgreementRequest, Attachment, CopyrightForm, EmailClient, MissingFields, OutboundEmail,
    RequiredFields, Sender,
};
use crate::routes::{submitted, SubmissionError};
use crate::templates::{render, CopyrightFormEmail, PublishingAgreementEmail};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use futures_util::TryStreamExt;

/// Multipart part carrying the signed form.
const SIGNED_FORM_PART: &str = "pdfFile";

/// Text parts and the uploaded file of a copyright form, as received.
#[derive(Default)]
pub struct CopyrightFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub paper_id: Option<String>,
    pub title: Option<String>,
    pub journal_name: Option<String>,
    pub signed_form: Option<Attachment>,
}

impl CopyrightFormData {
    fn set_text(&mut self, part: &str, value: String) {
        let slot = match part {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "paperID" | "paperId" => &mut self.paper_id,
            "title" => &mut self.title,
            "journalName" => &mut self.journal_name,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl TryFrom<CopyrightFormData> for CopyrightForm {
    type Error = MissingFields;

    fn try_from(value: CopyrightFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();
        let name = check.text("name", value.name);
        let email = check.text("email", value.email);
        let paper_id = check.text("paperID", value.paper_id);
        let title = check.text("title", value.title);
        let signed_form = value.signed_form.filter(|file| !file.content.is_empty());
        check.require(SIGNED_FORM_PART, signed_form.is_some());
        check.finish()?;

        let Some(signed_form) = signed_form else {
            return Err(MissingFields(vec![SIGNED_FORM_PART]));
        };
        Ok(CopyrightForm {
            name,
            email,
            paper_id,
            title,
            journal_name: optional(value.journal_name),
            signed_form,
        })
    }
}

/// Remaining byte allowance while a multipart body is read.
struct ReadBudget {
    part_limit: usize,
    request_remaining: usize,
    request_limit: usize,
}

impl ReadBudget {
    fn new(settings: &UploadSettings) -> Self {
        Self {
            part_limit: settings.max_file_bytes,
            request_remaining: settings.max_request_bytes,
            request_limit: settings.max_request_bytes,
        }
    }

    fn take(&mut self, part_len: usize, chunk_len: usize) -> Result<(), SubmissionError> {
        if part_len + chunk_len > self.part_limit {
            return Err(SubmissionError::Malformed(format!(
                "Uploaded file exceeds the {} byte limit",
                self.part_limit
            )));
        }
        self.request_remaining = self
            .request_remaining
            .checked_sub(chunk_len)
            .ok_or_else(|| {
                SubmissionError::Malformed(format!(
                    "Upload exceeds the {} byte request limit",
                    self.request_limit
                ))
            })?;
        Ok(())
    }
}

async fn read_part(
    field: &mut Field,
    budget: &mut ReadBudget,
) -> Result<Vec<u8>, SubmissionError> {
    let mut content = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| SubmissionError::Malformed(format!("Invalid multipart body: {}", e)))?
    {
        budget.take(content.len(), chunk.len())?;
        content.extend_from_slice(&chunk);
    }
    Ok(content)
}

#[tracing::instrument(name = "Reading a copyright form upload", skip(payload, budget))]
async fn read_copyright_form(
    mut payload: Multipart,
    mut budget: ReadBudget,
) -> Result<CopyrightFormData, SubmissionError> {
    let mut form = CopyrightFormData::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| SubmissionError::Malformed(format!("Invalid multipart body: {}", e)))?
    {
        let disposition = field.content_disposition();
        let part = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().map(str::to_string);

        let content = read_part(&mut field, &mut budget).await?;

        if part == SIGNED_FORM_PART {
            tracing::info!(bytes = content.len(), "Received signed copyright form");
            form.signed_form = Some(Attachment {
                file_name: file_name.unwrap_or_else(|| "copyright-form.pdf".to_string()),
                content,
            });
        } else {
            form.set_text(&part, String::from_utf8_lossy(&content).into_owned());
        }
    }

    Ok(form)
}

#[tracing::instrument(
    name = "Forwarding a signed copyright form",
    skip(payload, email_client, notifications, uploads)
)]
pub async fn send_copyright_form(
    payload: Multipart,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
    uploads: web::Data<UploadSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let form = read_copyright_form(payload, ReadBudget::new(&uploads)).await?;
    let form = CopyrightForm::try_from(form)?;

    let html = render(&CopyrightFormEmail::from(&form))?;
    let subject = format!(
        "Copyright Form Submission: {} [{}]",
        form.title, form.paper_id
    );
    let email = OutboundEmail::new(notifications.journal_inbox.as_str(), subject, html)
        .from_sender(Sender::new(&form.name, &notifications.journal_inbox))
        .with_attachments(vec![form.signed_form]);

    email_client
        .send_email(email)
        .await
        .context("Failed to send email")?;

    Ok(submitted("Copyright form sent successfully"))
}

#[derive(serde::Deserialize)]
pub struct AgreementFormData {
    #[serde(default, deserialize_with = "text_field")]
    pub name: Option<String>,
    #[serde(default, rename = "paperID", alias = "paperId", deserialize_with = "text_field")]
    pub paper_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "journalID",
        alias = "jounralID",
        alias = "journalId",
        deserialize_with = "text_field"
    )]
    pub journal_id: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub email: Option<String>,
}

impl TryFrom<AgreementFormData> for AgreementRequest {
    type Error = MissingFields;

    fn try_from(value: AgreementFormData) -> Result<Self, Self::Error> {
        let mut check = RequiredFields::new();
        let request = AgreementRequest {
            name: optional(value.name),
            paper_id: check.text("paperID", value.paper_id),
            title: check.text("title", value.title),
            journal_id: check.text("journalID", value.journal_id),
            email: check.text("email", value.email),
        };
        check.finish()?;
        Ok(request)
    }
}

#[tracing::instrument(
    name = "Sending a publishing agreement link",
    skip(form, email_client, notifications)
)]
pub async fn send_publishing_agreement(
    form: web::Json<AgreementFormData>,
    email_client: web::Data<dyn EmailClient>,
    notifications: web::Data<NotificationSettings>,
) -> Result<HttpResponse, SubmissionError> {
    let request = AgreementRequest::try_from(form.into_inner())?;

    let html = render(&PublishingAgreementEmail::new(
        &request,
        &notifications.agreement_base_url,
        &notifications.publishing_team_name,
        &notifications.journal_inbox,
    ))?;
    let email = OutboundEmail::new(
        request.email.as_str(),
        "Adroid Publishing: Publishing Agreement Link",
        html,
    )
    .from_sender(Sender::new(
        &notifications.publishing_team_name,
        &notifications.publishing_team_email,
    ));

    email_client
        .send_email(email)
        .await
        .context("Failed to send email")?;

    Ok(submitted("Email sent successfully"))
}
