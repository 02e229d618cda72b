use crate::adapters::{BrevoEmailClient, RssNewsFeed};
use crate::configuration::{NewsFeedSettings, NotificationSettings, Settings, UploadSettings};
use crate::domain::{EmailClient, NewsFeed, Sender};
use crate::routes::{
    confirm_paper_submission, fetch_news_feed, health_check, home, malformed_body,
    send_book_quotation, send_connectz_query, send_copyright_form, send_publishing_agreement,
    send_query_email, send_quotation,
};
use actix_web::dev::{Server, Service};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Data;
use actix_web::{web, App, HttpMessage, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use telemetry::CustomLevelRootSpanBuilder;
use tracing_actix_web::{RequestId, TracingLogger};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host_name, configuration.application.application_port
        ))?;

        let port = listener.local_addr()?.port();

        let email_settings = &configuration.email_settings;
        let email_client = BrevoEmailClient::new(
            email_settings.base_url.clone(),
            Sender::new(&email_settings.sender_name, &email_settings.sender_email),
            email_settings.api_key.clone(),
            email_settings.timeout(),
        )?;

        let server = run(
            listener,
            email_client,
            &configuration.news_feed,
            configuration.notifications,
            configuration.uploads,
        )?;

        tracing::info!(port, "Adroid relay listening");

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn run(
    listener: TcpListener,
    email_client: BrevoEmailClient,
    news_feed_settings: &NewsFeedSettings,
    notifications: NotificationSettings,
    uploads: UploadSettings,
) -> Result<Server, anyhow::Error> {
    let news_feed = RssNewsFeed::new(news_feed_settings)?;

    let email_client_arc: Arc<dyn EmailClient> = Arc::new(email_client);
    let email_client_data: Data<dyn EmailClient> = Data::from(email_client_arc);

    let news_feed_arc: Arc<dyn NewsFeed> = Arc::new(news_feed);
    let news_feed_data: Data<dyn NewsFeed> = Data::from(news_feed_arc);

    let notifications = Data::new(notifications);
    let uploads = Data::new(uploads);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<CustomLevelRootSpanBuilder>::new())
            .wrap_fn(|req, srv| {
                let res = srv.call(req);
                async move {
                    let mut res = res.await?;
                    let request_id = res.request().extensions().get::<RequestId>().copied();
                    if let Some(request_id) = request_id {
                        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                            res.headers_mut()
                                .insert(HeaderName::from_static("x-request-id"), value);
                        }
                    }
                    Ok(res)
                }
            })
            .app_data(web::JsonConfig::default().error_handler(|err, _req| malformed_body(err)))
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/fetchNewsFeed", web::get().to(fetch_news_feed))
            .route("/sendemail", web::post().to(send_query_email))
            .route(
                "/sendQueryToAdroidConnectz",
                web::post().to(send_connectz_query),
            )
            .route("/paperSubmission", web::post().to(confirm_paper_submission))
            .route("/sendCopyrightFormEmail", web::post().to(send_copyright_form))
            .route(
                "/sendCopyrightFormEmailFromAdminPanel",
                web::post().to(send_publishing_agreement),
            )
            .route("/sendQuotationToMail", web::post().to(send_quotation))
            .route(
                "/sendBookSeriesQuotationToMail",
                web::post().to(send_book_quotation),
            )
            .app_data(email_client_data.clone())
            .app_data(news_feed_data.clone())
            .app_data(notifications.clone())
            .app_data(uploads.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
