mod book_quotation;
mod contact;
mod copyright;
mod health_check;
mod news_feed;
mod paper_submission;
mod quotation;

pub use book_quotation::*;
pub use contact::*;
pub use copyright::*;
pub use health_check::*;
pub use news_feed::*;
pub use paper_submission::*;
pub use quotation::*;

use crate::domain::{MissingFields, QuoteReference};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Failure of any form-submission route. Renders the JSON error body the
/// front-ends expect.
#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("Missing required fields")]
    Validation(#[from] MissingFields),
    #[error("{0}")]
    Malformed(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Validation(_) | SubmissionError::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            SubmissionError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = self.to_string();
        let body = match self {
            SubmissionError::Validation(missing) => ErrorBody {
                error,
                missing_fields: Some(missing.fields()),
                message: None,
            },
            SubmissionError::Malformed(_) => ErrorBody {
                error,
                missing_fields: None,
                message: None,
            },
            SubmissionError::Unexpected(e) => {
                let cause = e.root_cause().to_string();
                ErrorBody {
                    message: (cause != error).then_some(cause),
                    error,
                    missing_fields: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body.failed())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<&'a [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<'a> ErrorBody<'a> {
    fn failed(self) -> Envelope<Self> {
        Envelope {
            success: false,
            body: self,
        }
    }
}

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Submitted<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote_ref: Option<&'a str>,
}

/// `200 {"success": true, "message": ...}`
pub fn submitted(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        body: Submitted {
            message,
            quote_ref: None,
        },
    })
}

/// `200 {"success": true, "message": ..., "quoteRef": ...}`
pub fn quoted(message: &str, quote_ref: &QuoteReference) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        body: Submitted {
            message,
            quote_ref: Some(quote_ref.as_str()),
        },
    })
}

/// Rejection body for request payloads that could not be decoded at all.
pub fn malformed_body(error: impl std::fmt::Display) -> actix_web::Error {
    SubmissionError::Malformed(format!("Invalid request body: {}", error)).into()
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
