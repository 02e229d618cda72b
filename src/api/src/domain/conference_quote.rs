use crate::domain::display_date::describe_date;

#[derive(Debug, Clone)]
pub struct Person {
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub affiliation: String,
    pub country: Option<String>,
}

impl Person {
    /// `Dr Ada Lovelace`, or `Ada Lovelace` when no title was given.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {} {}", title, self.first_name, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Organiser {
    pub person: Person,
    pub email: String,
    pub experience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConferenceDetails {
    pub title: String,
    pub abbreviated_title: String,
    pub subject: Option<String>,
    pub other_subject: Option<String>,
    pub journal: String,
    pub website: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue_address: Option<String>,
}

impl ConferenceDetails {
    /// The chosen subject, spelled out when the organiser picked "Other".
    pub fn subject_line(&self) -> String {
        match (self.subject.as_deref(), self.other_subject.as_deref()) {
            (Some("Other"), Some(other)) => format!("Other - {}", other),
            (Some(subject), _) => subject.to_string(),
            (None, _) => String::new(),
        }
    }

    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            describe_date(self.start_date.as_deref()),
            describe_date(self.end_date.as_deref())
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestedServices {
    pub abstract_management: bool,
    pub peer_review_management: bool,
    pub online_hosting: bool,
}

/// A request for a conference proceedings quotation.
#[derive(Debug, Clone)]
pub struct ConferenceQuote {
    pub organiser: Organiser,
    pub editor: Person,
    pub conference: ConferenceDetails,
    pub articles_count: String,
    pub participants_count: String,
    pub further_info: Option<String>,
    pub services: RequestedServices,
    pub how_did_you_hear: Option<String>,
    pub marketing_consent: bool,
}
