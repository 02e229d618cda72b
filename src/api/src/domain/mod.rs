pub mod book_proposal;
pub mod conference_quote;
pub mod contact_query;
pub mod display_date;
pub mod email_client;
pub mod manuscript;
pub mod news_feed;
pub mod quote_reference;
pub mod submission;

pub use book_proposal::{BookEditor, BookProposal};
pub use conference_quote::ConferenceQuote;
pub use contact_query::{ConnectzQuery, ContactQuery};
pub use email_client::{
    Attachment, DispatchError, EmailClient, OutboundEmail, Recipient, Recipients, Sender,
};
pub use manuscript::{AgreementRequest, CopyrightForm, PaperSubmission};
pub use news_feed::{FeedItem, FetchError, NewsFeed, SourceTagger};
pub use quote_reference::QuoteReference;
pub use submission::{MissingFields, RequiredFields};
