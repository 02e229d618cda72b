use chrono::{Local, NaiveDate};
use rand::{thread_rng, Rng};

/// Human-facing correlation id for a quotation, `PREFIX-YYYYMMDD-####`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteReference(String);

impl QuoteReference {
    pub const CONFERENCE_PREFIX: &'static str = "AQUOTE";
    pub const BOOK_SERIES_PREFIX: &'static str = "BQUOTE";

    pub fn generate(prefix: &str) -> Self {
        Self::generate_on(prefix, Local::now().date_naive())
    }

    pub fn generate_on(prefix: &str, date: NaiveDate) -> Self {
        let suffix: u16 = thread_rng().gen_range(1000..=9999);
        Self(format!("{}-{}-{}", prefix, date.format("%Y%m%d"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QuoteReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuoteReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
