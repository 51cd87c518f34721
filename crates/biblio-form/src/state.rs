//! Form state store and the incremental search workflow.

use biblio_core::{
    Author, BookField, DraftBook, LookupOutcome, Suggestion, SuggestionSource, ValidationErrors,
    merge_suggestion,
};
use tracing::debug;

/// Title length above which a lookup is dispatched.
pub const SEARCH_THRESHOLD: usize = 2;

/// Transient search UI state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    searching: bool,
    results: Vec<Suggestion>,
    /// Latest dispatched lookup's token; only its resolution is applied.
    generation: u64,
}

impl SearchState {
    pub fn searching(&self) -> bool {
        self.searching
    }

    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }
}

/// A lookup the driver should now run; produced by a qualifying title edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub query: String,
}

/// State store for one add-book form.
#[derive(Debug, Clone)]
pub struct AddBookForm {
    draft: DraftBook,
    errors: ValidationErrors,
    roster: Vec<Author>,
    search: SearchState,
}

impl AddBookForm {
    pub fn new(roster: Vec<Author>, year: i32) -> Self {
        Self {
            draft: DraftBook::blank(year),
            errors: ValidationErrors::new(),
            roster,
            search: SearchState::default(),
        }
    }

    pub fn draft(&self) -> &DraftBook {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn roster(&self) -> &[Author] {
        &self.roster
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Apply one field edit.
    ///
    /// The draft is updated synchronously: numeric fields coerce empty or
    /// non-numeric input to 0, and any validation error on the edited field
    /// is cleared (other fields keep theirs). Editing the title past the
    /// search threshold dispatches a lookup — the returned request carries
    /// the new latest generation; at or below the threshold the suggestion
    /// list is dropped and any in-flight lookup is invalidated.
    pub fn edit(&mut self, field: BookField, raw: &str) -> Option<LookupRequest> {
        match field {
            BookField::Title => self.draft.title = raw.to_string(),
            BookField::AuthorId => self.draft.author_id = raw.parse().unwrap_or(0),
            BookField::Isbn => self.draft.isbn = raw.to_string(),
            BookField::PublishedYear => self.draft.published_year = raw.parse().unwrap_or(0),
            BookField::Description => self.draft.description = raw.to_string(),
            BookField::CoverUrl => self.draft.cover_url = raw.to_string(),
        }

        self.errors.clear(field);

        if field != BookField::Title {
            return None;
        }

        if raw.chars().count() > SEARCH_THRESHOLD {
            self.search.generation += 1;
            self.search.searching = true;
            Some(LookupRequest {
                generation: self.search.generation,
                query: raw.to_string(),
            })
        } else {
            self.search.generation += 1;
            self.search.searching = false;
            self.search.results.clear();
            None
        }
    }

    /// Apply a lookup's outcome if it is still the latest dispatched one.
    ///
    /// Stale resolutions (an older lookup finishing after a newer dispatch,
    /// or after the title dropped below the threshold) are discarded.
    pub fn resolve_lookup(&mut self, generation: u64, outcome: LookupOutcome) {
        if generation != self.search.generation {
            debug!(
                generation,
                latest = self.search.generation,
                "discarding stale lookup resolution"
            );
            return;
        }
        self.search.results = outcome.suggestions();
        self.search.searching = false;
    }

    /// Run a dispatched lookup against the source and apply its outcome.
    pub async fn run_lookup<S: SuggestionSource>(&mut self, source: &S, request: LookupRequest) {
        let outcome = source.search(&request.query).await;
        self.resolve_lookup(request.generation, outcome);
    }

    /// Autofill the draft from the suggestion at `index`.
    ///
    /// Returns false when the index is out of range. Selection consumes the
    /// suggestion list.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(chosen) = self.search.results.get(index).cloned() else {
            return false;
        };
        let (draft, errors) = merge_suggestion(&self.draft, &chosen, &self.roster, &self.errors);
        self.draft = draft;
        self.errors = errors;
        self.search.results.clear();
        true
    }

    pub(crate) fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    pub(crate) fn reset(&mut self, year: i32) {
        self.draft = DraftBook::blank(year);
        self.errors = ValidationErrors::new();
        self.search = SearchState::default();
    }
}
