//! The in-progress book draft and its submit-time validation rules.
//!
//! Validation is a pure function over a draft snapshot: every rule is
//! evaluated independently, so multiple fields can be invalid at once, and
//! the result replaces the previous error map wholesale. Individual entries
//! are cleared as the user edits the corresponding field (see
//! `ValidationErrors::clear`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The not-yet-persisted book record being edited in the add-book form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftBook {
    pub title: String,
    /// 0 means no author selected; any other value is a roster id.
    pub author_id: i64,
    pub isbn: String,
    pub published_year: i32,
    pub description: String,
    pub cover_url: String,
}

impl DraftBook {
    /// A fresh, empty draft defaulting the year to the current one.
    pub fn blank(year: i32) -> Self {
        Self {
            title: String::new(),
            author_id: 0,
            isbn: String::new(),
            published_year: year,
            description: String::new(),
            cover_url: String::new(),
        }
    }
}

/// A field of [`DraftBook`], usable as a validation-error key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookField {
    Title,
    AuthorId,
    Isbn,
    PublishedYear,
    Description,
    CoverUrl,
}

impl BookField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::AuthorId => "author_id",
            Self::Isbn => "isbn",
            Self::PublishedYear => "published_year",
            Self::Description => "description",
            Self::CoverUrl => "cover_url",
        }
    }
}

/// Per-field validation messages; keys present only for invalid fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<BookField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: BookField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Remove the entry for one field, leaving the rest untouched.
    pub fn clear(&mut self, field: BookField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validate a draft against the submit-time rules.
///
/// `current_year` caps the publication year; it is injected rather than read
/// from the wall clock (see [`crate::Clock`]).
pub fn validate(draft: &DraftBook, current_year: i32) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.set(BookField::Title, "Title is required");
    }

    if draft.author_id == 0 {
        errors.set(BookField::AuthorId, "Please select an author");
    }

    if draft.isbn.trim().is_empty() {
        errors.set(BookField::Isbn, "ISBN is required");
    } else if !is_isbn_charset(&draft.isbn) {
        errors.set(BookField::Isbn, "ISBN should only contain numbers and hyphens");
    }

    if draft.published_year < 1000 || draft.published_year > current_year {
        errors.set(BookField::PublishedYear, "Please enter a valid publication year");
    }

    if draft.description.trim().is_empty() {
        errors.set(BookField::Description, "Description is required");
    }

    if draft.cover_url.trim().is_empty() {
        errors.set(BookField::CoverUrl, "Cover URL is required");
    } else if !is_http_url(&draft.cover_url) {
        errors.set(
            BookField::CoverUrl,
            "Please enter a valid URL (starting with http:// or https://)",
        );
    }

    errors
}

/// Digits and hyphens only, at least one character.
fn is_isbn_charset(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// `http://` or `https://` followed by at least one character.
fn is_http_url(s: &str) -> bool {
    s.strip_prefix("http://")
        .or_else(|| s.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> DraftBook {
        DraftBook {
            title: "The Left Hand of Darkness".into(),
            author_id: 3,
            isbn: "978-0-441-47812-5".into(),
            published_year: 1969,
            description: "An envoy on a glacial planet.".into(),
            cover_url: "https://example.com/lhod.jpg".into(),
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        let errors = validate(&valid_draft(), 2024);
        assert!(errors.is_empty());
    }

    #[test]
    fn every_rule_fires_independently() {
        let draft = DraftBook {
            title: "".into(),
            author_id: 0,
            isbn: "abc123".into(),
            published_year: 3000,
            description: "".into(),
            cover_url: "ftp://x".into(),
        };
        let errors = validate(&draft, 2024);
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(BookField::Title), Some("Title is required"));
        assert_eq!(errors.get(BookField::AuthorId), Some("Please select an author"));
        assert_eq!(
            errors.get(BookField::Isbn),
            Some("ISBN should only contain numbers and hyphens")
        );
        assert_eq!(
            errors.get(BookField::PublishedYear),
            Some("Please enter a valid publication year")
        );
        assert_eq!(errors.get(BookField::Description), Some("Description is required"));
        assert_eq!(
            errors.get(BookField::CoverUrl),
            Some("Please enter a valid URL (starting with http:// or https://)")
        );
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let mut draft = valid_draft();
        draft.title = "   ".into();
        draft.description = "\t".into();
        let errors = validate(&draft, 2024);
        assert!(errors.get(BookField::Title).is_some());
        assert!(errors.get(BookField::Description).is_some());
    }

    #[test]
    fn empty_isbn_reports_required_not_charset() {
        let mut draft = valid_draft();
        draft.isbn = "".into();
        let errors = validate(&draft, 2024);
        assert_eq!(errors.get(BookField::Isbn), Some("ISBN is required"));
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let mut draft = valid_draft();
        draft.published_year = 1000;
        assert!(validate(&draft, 2024).is_empty());
        draft.published_year = 2024;
        assert!(validate(&draft, 2024).is_empty());
        draft.published_year = 999;
        assert!(validate(&draft, 2024).get(BookField::PublishedYear).is_some());
        draft.published_year = 2025;
        assert!(validate(&draft, 2024).get(BookField::PublishedYear).is_some());
    }

    #[test]
    fn year_cap_follows_injected_clock() {
        let mut draft = valid_draft();
        draft.published_year = 2030;
        assert!(validate(&draft, 2024).get(BookField::PublishedYear).is_some());
        assert!(validate(&draft, 2031).is_empty());
    }

    #[test]
    fn cover_url_accepts_both_schemes() {
        let mut draft = valid_draft();
        draft.cover_url = "http://example.com/a.jpg".into();
        assert!(validate(&draft, 2024).is_empty());
        draft.cover_url = "https://".into();
        assert!(validate(&draft, 2024).get(BookField::CoverUrl).is_some());
    }

    #[test]
    fn blank_draft_defaults_year() {
        let draft = DraftBook::blank(2024);
        assert_eq!(draft.published_year, 2024);
        assert_eq!(draft.author_id, 0);
        assert!(draft.title.is_empty());
    }

    #[test]
    fn clearing_one_field_leaves_others() {
        let mut errors = ValidationErrors::new();
        errors.set(BookField::Title, "Title is required");
        errors.set(BookField::Isbn, "ISBN is required");
        errors.clear(BookField::Title);
        assert!(errors.get(BookField::Title).is_none());
        assert_eq!(errors.get(BookField::Isbn), Some("ISBN is required"));
    }
}
