use adroid_relay::configuration::{get_configuration, Settings};
use adroid_relay::startup::Application;
use once_cell::sync::Lazy;
use serde_json::Value;
use telemetry::{get_subscriber, init_subscriber, init_tracer};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Lazy<()> = Lazy::new(|| {
    let mut configuration = get_configuration().expect("Failed to read configuration");
    let default_filter = "info".to_string();
    let subscriber_name = "test".to_string();
    configuration.telemetry.dataset_name = format!("test-{}", configuration.telemetry.dataset_name);
    configuration.telemetry.otlp_endpoint = String::new();

    let trace_provider =
        init_tracer(&configuration.telemetry).expect("Failed to build the tracer provider");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::stdout,
            &configuration.telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::sink,
            &configuration.telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub feed_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_json(&self, route: &str, body: &Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, route))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_multipart(
        &self,
        route: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, route))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, route: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, route))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The JSON bodies Brevo received, in arrival order.
    pub async fn sent_emails(&self) -> Vec<Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like `spawn_app`, with a final say over the settings.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    // Stand-ins for Brevo's API and the two RSS sources
    let email_server = MockServer::start().await;
    let feed_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.application_port = 0;
        c.application.host_name = "127.0.0.1".to_string();
        c.email_settings.base_url = email_server.uri();
        c.email_settings.timeout_milliseconds = 2_000;
        c.news_feed.primary_url = format!("{}/techcrunch/feed", feed_server.uri());
        c.news_feed.secondary_url = format!("{}/wsj/feed", feed_server.uri());
        c.news_feed.timeout_milliseconds = 2_000;
        customise(&mut c);
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        feed_server,
        api_client: reqwest::Client::new(),
    }
}

/// Brevo accepts every message and the test expects exactly `count` of them.
pub async fn accept_emails(app: &TestApp, count: u64) {
    Mock::given(path("/v3/smtp/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(count)
        .mount(&app.email_server)
        .await;
}

/// Brevo must not be called at all.
pub async fn refuse_any_email(app: &TestApp) {
    Mock::given(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.email_server)
        .await;
}

/// Brevo answers every message with a 500.
pub async fn fail_every_email(app: &TestApp) {
    Mock::given(path("/v3/smtp/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1..)
        .mount(&app.email_server)
        .await;
}

pub fn assert_missing_fields(body: &Value, expected: &[&str]) {
    assert_eq!(body["success"], false);
    let reported: Vec<&str> = body["missingFields"]
        .as_array()
        .expect("missingFields should be an array")
        .iter()
        .map(|field| field.as_str().unwrap())
        .collect();
    assert_eq!(reported, expected);
}

/// Every recipient address in one Brevo request body.
pub fn recipients(email: &Value) -> Vec<String> {
    email["to"]
        .as_array()
        .unwrap()
        .iter()
        .map(|to| to["email"].as_str().unwrap().to_string())
        .collect()
}
