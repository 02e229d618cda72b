use crate::configuration::NewsFeedSettings;
use crate::domain::{FeedItem, FetchError, NewsFeed, SourceTagger};
use async_trait::async_trait;
use reqwest::Client;
use rss::Channel;

/// Pulls the primary and secondary RSS feeds and merges them into one list.
#[derive(Clone)]
pub struct RssNewsFeed {
    http_client: Client,
    primary_url: String,
    secondary_url: String,
    tagger: SourceTagger,
}

impl RssNewsFeed {
    pub fn new(settings: &NewsFeedSettings) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            http_client,
            primary_url: settings.primary_url.clone(),
            secondary_url: settings.secondary_url.clone(),
            tagger: SourceTagger {
                known_domain: settings.known_domain.clone(),
                known_label: settings.known_label.clone(),
                fallback_label: settings.fallback_label.clone(),
            },
        })
    }

    #[tracing::instrument(name = "Fetching RSS channel", skip(self))]
    async fn fetch_channel(&self, url: &str) -> Result<Channel, FetchError> {
        let content = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(request_error(url))?
            .error_for_status()
            .map_err(request_error(url))?
            .bytes()
            .await
            .map_err(request_error(url))?;

        Channel::read_from(&content[..]).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

fn request_error(url: &str) -> impl Fn(reqwest::Error) -> FetchError + '_ {
    move |source| FetchError::Request {
        url: url.to_string(),
        source,
    }
}

#[async_trait]
impl NewsFeed for RssNewsFeed {
    async fn fetch_feed(&self) -> Result<Vec<FeedItem>, FetchError> {
        let (primary, secondary) = futures::try_join!(
            self.fetch_channel(&self.primary_url),
            self.fetch_channel(&self.secondary_url)
        )?;

        let items = primary
            .items()
            .iter()
            .chain(secondary.items())
            .map(|item| FeedItem::from_rss(item, &self.tagger))
            .collect::<Vec<_>>();

        tracing::info!(items = items.len(), "Merged news feed");
        Ok(items)
    }
}
