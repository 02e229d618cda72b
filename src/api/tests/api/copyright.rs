use crate::helpers::{
    accept_emails, assert_missing_fields, fail_every_email, recipients, refuse_any_email,
    spawn_app, spawn_app_with,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

const PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n";

fn text_parts() -> Form {
    Form::new()
        .text("name", "Ada Lovelace")
        .text("email", "ada@example.com")
        .text("paperID", "AJCS-2025-017")
        .text("title", "Notes on the Analytical Engine")
}

fn signed_form() -> Part {
    Part::bytes(PDF)
        .file_name("signed-form.pdf")
        .mime_str("application/pdf")
        .unwrap()
}

#[tokio::test]
async fn the_signed_form_is_attached_to_the_journal_email() {
    let app = spawn_app().await;
    accept_emails(&app, 1).await;

    let response = app
        .post_multipart(
            "/sendCopyrightFormEmail",
            text_parts().part("pdfFile", signed_form()),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.sent_emails().await;
    assert_eq!(recipients(&sent[0]), vec!["adroidjournal@gmail.com"]);
    assert_eq!(sent[0]["attachment"][0]["name"], "signed-form.pdf");
    assert_eq!(sent[0]["attachment"][0]["content"], STANDARD.encode(PDF));
}

#[tokio::test]
async fn a_missing_upload_is_rejected() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let response = app
        .post_multipart("/sendCopyrightFormEmail", text_parts())
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_missing_fields(&body, &["pdfFile"]);
}

#[tokio::test]
async fn missing_text_parts_are_reported() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let form = Form::new()
        .text("name", "Ada Lovelace")
        .part("pdfFile", signed_form());
    let response = app.post_multipart("/sendCopyrightFormEmail", form).await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_missing_fields(&body, &["email", "paperID", "title"]);
}

#[tokio::test]
async fn a_copyright_provider_failure_is_a_500() {
    let app = spawn_app().await;
    fail_every_email(&app).await;

    let response = app
        .post_multipart(
            "/sendCopyrightFormEmail",
            text_parts().part("pdfFile", signed_form()),
        )
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn many_parts_cannot_exceed_the_request_limit() {
    let app = spawn_app_with(|c| {
        c.uploads.max_file_bytes = 1_024;
        c.uploads.max_request_bytes = 2_048;
    })
    .await;
    refuse_any_email(&app).await;

    let filler = "x".repeat(1_000);
    let form = text_parts()
        .text("note1", filler.clone())
        .text("note2", filler.clone())
        .text("note3", filler)
        .part("pdfFile", signed_form());
    let response = app.post_multipart("/sendCopyrightFormEmail", form).await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("2048 byte request limit"));
}

#[tokio::test]
async fn a_non_multipart_body_is_a_400() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let response = app
        .post_json("/sendCopyrightFormEmail", &json!({"name": "Ada"}))
        .await;

    assert_eq!(400, response.status().as_u16());
}

fn agreement_request() -> Value {
    json!({
        "name": "Ada Lovelace",
        "paperID": "AJCS-2025-017",
        "title": "Notes on the Analytical Engine",
        "journalID": "ajcs",
        "email": "ada@example.com"
    })
}

#[tokio::test]
async fn the_admin_panel_sends_the_agreement_link_to_the_author() {
    let app = spawn_app().await;
    accept_emails(&app, 1).await;

    let response = app
        .post_json("/sendCopyrightFormEmailFromAdminPanel", &agreement_request())
        .await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.sent_emails().await;
    assert_eq!(recipients(&sent[0]), vec!["ada@example.com"]);
    assert_eq!(sent[0]["sender"]["name"], "Adroid Publishing Team");
    assert_eq!(sent[0]["sender"]["email"], "adroidpublications@gmail.com");

    let html = sent[0]["htmlContent"].as_str().unwrap();
    let links: Vec<_> = linkify::LinkFinder::new()
        .links(html)
        .filter(|l| *l.kind() == linkify::LinkKind::Url)
        .map(|l| l.as_str().to_owned())
        .collect();
    assert!(links
        .iter()
        .any(|link| link == "https://www.adroidjournals.com/publishingagreement/ajcs"));
}

#[tokio::test]
async fn the_misspelled_journal_key_still_works() {
    let app = spawn_app().await;
    accept_emails(&app, 1).await;

    let mut body = agreement_request();
    let object = body.as_object_mut().unwrap();
    object.remove("journalID");
    object.insert("jounralID".into(), json!("ajcs"));

    let response = app
        .post_json("/sendCopyrightFormEmailFromAdminPanel", &body)
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn each_agreement_field_is_required() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    for field in ["paperID", "title", "journalID", "email"] {
        let mut body = agreement_request();
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .post_json("/sendCopyrightFormEmailFromAdminPanel", &body)
            .await;

        assert_eq!(400, response.status().as_u16(), "{} was not required", field);
        let body: Value = response.json().await.unwrap();
        assert_missing_fields(&body, &[field]);
    }
}

#[tokio::test]
async fn an_agreement_provider_failure_is_a_500() {
    let app = spawn_app().await;
    fail_every_email(&app).await;

    let response = app
        .post_json("/sendCopyrightFormEmailFromAdminPanel", &agreement_request())
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send email");
}
