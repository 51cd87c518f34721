//! Shared catalog record types.
//!
//! These are the normalized shapes the rest of the workspace works with.
//! The persistence API's raw, everything-optional payloads live in
//! `biblio-client`, which maps them into these records.

use serde::{Deserialize, Serialize};

/// An author known to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
    /// Book summaries embedded in the authors listing, when the API sends them.
    pub books: Option<Vec<BookSummary>>,
}

/// Abbreviated book record nested under an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub author_id: i64,
}

/// A persisted book record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub isbn: String,
    pub published_year: i32,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Input for creating a new author.
///
/// Only `name` is sent to the persistence API; the remaining fields are
/// kept client-side and back-filled into the returned record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAuthorInput {
    pub name: String,
    pub bio: Option<String>,
    pub birth_year: Option<i32>,
    pub country: Option<String>,
}
