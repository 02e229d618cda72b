pub mod brevo_email_client;
pub mod rss_news_feed;

pub use brevo_email_client::BrevoEmailClient;
pub use rss_news_feed::RssNewsFeed;
