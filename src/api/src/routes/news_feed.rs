use crate::domain::{FetchError, NewsFeed};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

#[derive(thiserror::Error)]
#[error("Failed to fetch RSS feeds: {0}")]
pub struct NewsFeedError(#[from] FetchError);

impl std::fmt::Debug for NewsFeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        super::error_chain_fmt(self, f)
    }
}

impl ResponseError for NewsFeedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[tracing::instrument(name = "Fetching the news feed", skip(news_feed))]
pub async fn fetch_news_feed(
    news_feed: web::Data<dyn NewsFeed>,
) -> Result<HttpResponse, NewsFeedError> {
    let items = news_feed.fetch_feed().await?;
    Ok(HttpResponse::Ok().json(items))
}
