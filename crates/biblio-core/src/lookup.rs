//! Suggestion shape produced by the remote metadata lookup, and the
//! collaborator seams the form engine is written against.

use serde::{Deserialize, Serialize};

use crate::catalog::Book;
use crate::draft::DraftBook;

/// A normalized autofill candidate from the external metadata index.
///
/// Produced fresh per lookup and immutable once constructed; the form
/// discards the whole list when a new query starts, the title drops below
/// the search threshold, or a suggestion is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub authors: Vec<String>,
    /// First listed author, used for roster resolution.
    pub primary_author: Option<String>,
    pub description: Option<String>,
    pub published_year: Option<i32>,
    /// Raw date string as sent by the index, e.g. "2003-05-01" or "2003".
    pub published_date: Option<String>,
    pub cover_url: Option<String>,
    pub isbn13: Option<String>,
    /// Preferred identifier: ISBN-13 when available, otherwise any other.
    pub isbn: Option<String>,
}

/// Result of one metadata lookup.
///
/// Lookup failures are absorbed by contract — the user only ever sees an
/// empty suggestion list — but the absorbed case stays distinguishable from
/// a genuinely empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Results(Vec<Suggestion>),
    /// The lookup errored; rendered as no suggestions.
    Failed,
}

impl LookupOutcome {
    /// The suggestions to display. `Failed` collapses to an empty list.
    pub fn suggestions(self) -> Vec<Suggestion> {
        match self {
            Self::Results(items) => items,
            Self::Failed => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Parse a publication year from the first four characters of a raw date
/// string. Returns `None` for short or non-numeric prefixes; never panics.
pub fn parse_year_prefix(date: &str) -> Option<i32> {
    if date.chars().count() < 4 {
        return None;
    }
    date.chars().take(4).collect::<String>().parse().ok()
}

/// Asynchronous title lookup against the external metadata index.
#[allow(async_fn_in_trait)]
pub trait SuggestionSource {
    async fn search(&self, query: &str) -> LookupOutcome;
}

/// The book-creation collaborator the submission pipeline delegates to.
#[allow(async_fn_in_trait)]
pub trait BookWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_book(&self, draft: &DraftBook) -> Result<Book, Self::Error>;
}

/// Supplier of the current author roster used for name resolution.
#[allow(async_fn_in_trait)]
pub trait RosterProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_authors(&self) -> Result<Vec<crate::catalog::Author>, Self::Error>;
}
