use crate::routes::error_chain_fmt;
use async_trait::async_trait;
use serde::Serialize;

#[derive(thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} did not return a valid RSS document: {source}")]
    Parse {
        url: String,
        #[source]
        source: rss::Error,
    },
}

impl std::fmt::Debug for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// All items of every configured source, in source order. Fails as a whole
    /// when any single source fails.
    async fn fetch_feed(&self) -> Result<Vec<FeedItem>, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_snippet: Option<String>,
    pub source: String,
}

impl FeedItem {
    pub fn from_rss(item: &rss::Item, tagger: &SourceTagger) -> Self {
        let body = item.description().or_else(|| item.content());
        Self {
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
            pub_date: item.pub_date().map(str::to_string),
            content_snippet: body.map(content_snippet),
            source: tagger.label_for(item.link()).to_string(),
        }
    }
}

/// Labels an item by the domain of its link. Links outside `known_domain`,
/// and items without a link, get `fallback_label`.
#[derive(Debug, Clone)]
pub struct SourceTagger {
    pub known_domain: String,
    pub known_label: String,
    pub fallback_label: String,
}

impl SourceTagger {
    pub fn label_for(&self, link: Option<&str>) -> &str {
        match link {
            Some(link) if link.contains(self.known_domain.as_str()) => &self.known_label,
            _ => &self.fallback_label,
        }
    }
}

/// Plain-text preview of an item body: markup stripped, entities decoded,
/// whitespace collapsed.
pub fn content_snippet(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = decode_entities(&text);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves numeric references (`&#8211;`, `&#x27;`) and the named entities
/// feeds commonly use. Anything unrecognised is kept verbatim.
fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];
        let resolved = rest
            .find(';')
            .filter(|end| *end <= MAX_ENTITY_LEN)
            .and_then(|end| resolve_entity(&rest[1..end]).map(|c| (c, end)));
        match resolved {
            Some((c, end)) => {
                decoded.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

const MAX_ENTITY_LEN: usize = 10;

fn resolve_entity(entity: &str) -> Option<char> {
    if let Some(number) = entity.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        _ => return None,
    };
    Some(c)
}
