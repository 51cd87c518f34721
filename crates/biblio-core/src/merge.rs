//! Autofill merge policy: copy fields from a chosen suggestion into the
//! draft, with defined precedence, and best-effort author resolution
//! against the roster.

use tracing::debug;

use crate::catalog::Author;
use crate::draft::{BookField, DraftBook, ValidationErrors};
use crate::lookup::{Suggestion, parse_year_prefix};

const OPENLIBRARY_COVERS: &str = "https://covers.openlibrary.org/b/isbn";

/// Merge a chosen suggestion into the current draft.
///
/// A suggestion field overrides the draft only when present: title when
/// non-empty; description and isbn when set; cover falls back to an Open
/// Library cover derived from the ISBN-13 before keeping the draft's value;
/// year falls back to the first four characters of the raw publish date.
///
/// Author resolution is an exact, case-sensitive name match on the
/// suggestion's primary author. A hit sets `author_id` and clears its
/// validation error; a miss leaves `author_id` alone and records an error
/// prompting manual selection. The merge never creates an author record.
pub fn merge_suggestion(
    draft: &DraftBook,
    suggestion: &Suggestion,
    roster: &[Author],
    errors: &ValidationErrors,
) -> (DraftBook, ValidationErrors) {
    let mut next = draft.clone();
    let mut next_errors = errors.clone();

    if !suggestion.title.is_empty() {
        next.title = suggestion.title.clone();
    }

    if let Some(description) = &suggestion.description {
        next.description = description.clone();
    }

    next.cover_url = suggestion
        .cover_url
        .clone()
        .or_else(|| {
            suggestion
                .isbn13
                .as_ref()
                .map(|isbn| format!("{OPENLIBRARY_COVERS}/{isbn}-L.jpg"))
        })
        .unwrap_or_else(|| draft.cover_url.clone());

    next.published_year = suggestion
        .published_year
        .or_else(|| suggestion.published_date.as_deref().and_then(parse_year_prefix))
        .unwrap_or(draft.published_year);

    if let Some(isbn) = suggestion.isbn.as_ref().or(suggestion.isbn13.as_ref()) {
        next.isbn = isbn.clone();
    }

    if let Some(name) = &suggestion.primary_author {
        match roster.iter().find(|author| author.name == *name) {
            Some(author) => {
                next.author_id = author.id;
                next_errors.clear(BookField::AuthorId);
            }
            None => {
                debug!(author = %name, "suggestion author not in roster");
                next_errors.set(
                    BookField::AuthorId,
                    "No author found for this book. Please select manually.",
                );
            }
        }
    }

    (next, next_errors)
}
