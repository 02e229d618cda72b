use crate::helpers::{
    accept_emails, assert_missing_fields, fail_every_email, recipients, refuse_any_email,
    spawn_app,
};
use serde_json::{json, Value};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_valid_query_is_forwarded_to_the_journal_inbox() {
    let app = spawn_app().await;
    accept_emails(&app, 1).await;

    let response = app
        .post_json(
            "/sendemail",
            &json!({"name": "A", "email": "a@b.com", "message": "hi"}),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");

    let sent = app.sent_emails().await;
    assert_eq!(recipients(&sent[0]), vec!["adroidjournal@gmail.com"]);
    assert_eq!(sent[0]["sender"]["name"], "A");
    assert_eq!(sent[0]["subject"], "New Query");
}

#[tokio::test]
async fn a_query_with_missing_fields_is_rejected_before_dispatch() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let test_cases = vec![
        (json!({"email": "a@b.com", "message": "hi"}), "name"),
        (json!({"name": "A", "message": "hi"}), "email"),
        (json!({"name": "A", "email": "a@b.com"}), "message"),
        (json!({"name": "   ", "email": "a@b.com", "message": "hi"}), "name"),
    ];

    for (invalid_body, missing) in test_cases {
        let response = app.post_json("/sendemail", &invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when {} was missing.",
            missing
        );
        let body: Value = response.json().await.unwrap();
        assert_missing_fields(&body, &[missing]);
    }
}

#[tokio::test]
async fn a_provider_failure_is_reported_as_500() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_json(
            "/sendemail",
            &json!({"name": "A", "email": "a@b.com", "message": "hi"}),
        )
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send email");
}

#[tokio::test]
async fn malformed_json_is_a_400() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let response = app
        .api_client
        .post(&format!("{}/sendemail", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn submitted_markup_is_escaped_in_the_email() {
    let app = spawn_app().await;
    accept_emails(&app, 1).await;

    app.post_json(
        "/sendemail",
        &json!({"name": "A", "email": "a@b.com", "message": "<script>alert(1)</script>"}),
    )
    .await;

    let sent = app.sent_emails().await;
    let html = sent[0]["htmlContent"].as_str().unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&#60;script&#62;alert(1)"));
}

#[tokio::test]
async fn a_connectz_query_goes_to_the_connectz_inbox() {
    let app = spawn_app().await;
    Mock::given(path("/v3/smtp/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_json(
            "/sendQueryToAdroidConnectz",
            &json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "organization": "Analytical Society",
                "service": "Consulting",
                "message": "Hello"
            }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.sent_emails().await;
    assert_eq!(recipients(&sent[0]), vec!["info@adroidconnectz.co.uk"]);
    assert_eq!(sent[0]["sender"]["name"], "Ada Lovelace");
    assert_eq!(
        sent[0]["subject"],
        "New Contact Form Submission - Adroid Connectz"
    );
}

fn connectz_query() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "organization": "Analytical Society",
        "service": "Consulting",
        "message": "Hello"
    })
}

#[tokio::test]
async fn each_connectz_field_is_required() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    for field in [
        "firstName",
        "lastName",
        "email",
        "organization",
        "service",
        "message",
    ] {
        let mut body = connectz_query();
        body.as_object_mut().unwrap().remove(field);

        let response = app.post_json("/sendQueryToAdroidConnectz", &body).await;

        assert_eq!(400, response.status().as_u16(), "{} was not required", field);
        let body: Value = response.json().await.unwrap();
        assert_missing_fields(&body, &[field]);
    }
}

#[tokio::test]
async fn a_connectz_provider_failure_is_a_500() {
    let app = spawn_app().await;
    fail_every_email(&app).await;

    let response = app
        .post_json("/sendQueryToAdroidConnectz", &connectz_query())
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send email");
}
