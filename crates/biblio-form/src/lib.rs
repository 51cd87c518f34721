//! The add-book form engine.
//!
//! Owns the draft being edited, its validation errors, and the transient
//! title-search state. Field edits are synchronous; the title field
//! additionally dispatches a metadata lookup once it passes a length
//! threshold, and each dispatch carries a generation token so that only the
//! latest lookup's resolution is ever applied.

mod state;
mod submit;

pub use state::{AddBookForm, LookupRequest, SEARCH_THRESHOLD, SearchState};
pub use submit::SubmitOutcome;
