use crate::domain::email_client::Attachment;

/// Author details captured when a manuscript is submitted.
#[derive(Debug, Clone)]
pub struct PaperSubmission {
    pub name: String,
    pub email: String,
    pub paper_title: String,
    pub journal_name: String,
    pub paper_id: Option<String>,
}

/// A signed copyright form uploaded by an author.
#[derive(Debug, Clone)]
pub struct CopyrightForm {
    pub name: String,
    pub email: String,
    pub paper_id: String,
    pub title: String,
    pub journal_name: Option<String>,
    pub signed_form: Attachment,
}

/// Issued from the admin panel: asks an author to complete the publishing
/// agreement for an accepted paper.
#[derive(Debug, Clone)]
pub struct AgreementRequest {
    pub name: Option<String>,
    pub paper_id: String,
    pub title: String,
    pub journal_id: String,
    pub email: String,
}

impl AgreementRequest {
    pub fn agreement_link(&self, agreement_base_url: &str) -> String {
        format!(
            "{}/{}",
            agreement_base_url.trim_end_matches('/'),
            self.journal_id
        )
    }
}
