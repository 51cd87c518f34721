//! Core catalog domain: record types, draft validation, autofill merge,
//! free-text filtering, and the collaborator seams the rest of the
//! workspace implements.

pub mod catalog;
pub mod clock;
pub mod draft;
pub mod filter;
pub mod lookup;
pub mod merge;

pub use catalog::{Author, Book, BookSummary, CreateAuthorInput};
pub use clock::{Clock, FixedClock};
pub use draft::{BookField, DraftBook, ValidationErrors, validate};
pub use filter::{books_by_author, filter_authors, filter_books};
pub use lookup::{
    BookWriter, LookupOutcome, RosterProvider, Suggestion, SuggestionSource, parse_year_prefix,
};
pub use merge::merge_suggestion;
