use crate::helpers::{
    accept_emails, assert_missing_fields, recipients, refuse_any_email, spawn_app,
};
use regex::Regex;
use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

fn proposal(chapters: usize) -> Value {
    json!({
        "editors": [
            {
                "name": "Ada Lovelace",
                "affiliation": "Analytical Society",
                "email": "ada@example.com",
                "bio": "Mathematician"
            },
            {
                "name": "Charles Babbage",
                "affiliation": "Cambridge",
                "email": "charles@example.com",
                "bio": "Engineer"
            }
        ],
        "bookTitle": "Engines of Thought",
        "aboutBook": "A history of mechanical computation",
        "scope": "From the difference engine onwards",
        "chapters": (1..=chapters)
            .map(|i| json!({"title": format!("Chapter topic {}", i)}))
            .collect::<Vec<_>>(),
        "promotionPlan": "Conference stalls",
        "targetAudience": "Historians"
    })
}

#[tokio::test]
async fn a_valid_proposal_notifies_publications_and_the_primary_editor() {
    let app = spawn_app().await;
    accept_emails(&app, 2).await;

    let response = app
        .post_json("/sendBookSeriesQuotationToMail", &proposal(10))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let quote_ref = body["quoteRef"].as_str().unwrap();
    assert!(Regex::new(r"^BQUOTE-\d{8}-\d{4}$").unwrap().is_match(quote_ref));

    let sent = app.sent_emails().await;
    let mut addressed: Vec<String> = sent.iter().flat_map(recipients).collect();
    addressed.sort();
    assert_eq!(
        addressed,
        vec!["ada@example.com", "adroidpublications@gmail.com"]
    );

    let admin = sent
        .iter()
        .find(|email| recipients(email) == vec!["adroidpublications@gmail.com"])
        .unwrap();
    let html = admin["htmlContent"].as_str().unwrap();
    assert!(html.contains("Charles Babbage"));
    assert!(html.contains("Chapter topic 10"));
}

#[tokio::test]
async fn fewer_than_ten_chapters_are_rejected() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    let response = app
        .post_json("/sendBookSeriesQuotationToMail", &proposal(9))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_missing_fields(&body, &["chapters"]);
}

#[tokio::test]
async fn missing_text_fields_and_editors_are_rejected() {
    let app = spawn_app().await;
    refuse_any_email(&app).await;

    for field in ["editors", "bookTitle", "aboutBook", "scope"] {
        let mut body = proposal(10);
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .post_json("/sendBookSeriesQuotationToMail", &body)
            .await;

        assert_eq!(400, response.status().as_u16(), "{} was not required", field);
        let body: Value = response.json().await.unwrap();
        assert_missing_fields(&body, &[field]);
    }
}

#[tokio::test]
async fn a_provider_failure_is_reported_as_500() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;

    let response = app
        .post_json("/sendBookSeriesQuotationToMail", &proposal(12))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to process book quotation request");
}
