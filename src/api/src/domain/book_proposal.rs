/// Minimum number of tentative chapters a book-series proposal must list.
pub const MINIMUM_CHAPTERS: usize = 10;

#[derive(Debug, Clone)]
pub struct BookEditor {
    pub name: String,
    pub affiliation: String,
    pub email: String,
    pub bio: String,
}

/// A book-series proposal. The first editor is the primary contact.
#[derive(Debug, Clone)]
pub struct BookProposal {
    pub editors: Vec<BookEditor>,
    pub book_title: String,
    pub about_book: String,
    pub scope: String,
    pub chapters: Vec<String>,
    pub promotion_plan: Option<String>,
    pub target_audience: Option<String>,
}

impl BookProposal {
    pub fn primary_editor(&self) -> Option<&BookEditor> {
        self.editors.first()
    }
}
