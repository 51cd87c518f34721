//! Submission pipeline: validate, delegate to the book-creation
//! collaborator, reset on success.

use biblio_core::{Book, BookWriter, validate};
use tracing::info;

use crate::state::AddBookForm;

/// What a submit attempt produced.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Validation failed; the errors are stored on the form and no network
    /// call was made.
    Invalid,
    /// The collaborator persisted the draft; the form has been reset.
    Created(Book),
}

impl AddBookForm {
    /// Validate the draft and, if clean, hand it to the writer.
    ///
    /// A collaborator failure propagates to the caller with the draft and
    /// errors left intact, so the user can correct and retry. On success the
    /// form resets to a blank draft for `current_year`.
    pub async fn submit<W: BookWriter>(
        &mut self,
        writer: &W,
        current_year: i32,
    ) -> Result<SubmitOutcome, W::Error> {
        let errors = validate(self.draft(), current_year);
        let valid = errors.is_empty();
        *self.errors_mut() = errors;
        if !valid {
            info!(errors = self.errors().len(), "draft failed validation");
            return Ok(SubmitOutcome::Invalid);
        }

        let book = writer.create_book(self.draft()).await?;
        info!(id = book.id, title = %book.title, "book created");
        self.reset(current_year);
        Ok(SubmitOutcome::Created(book))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use biblio_core::{Book, BookField, DraftBook};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("writer rejected the draft")]
    struct FakeRejection;

    struct FakeWriter {
        calls: AtomicU32,
        fail: bool,
    }

    impl FakeWriter {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl BookWriter for FakeWriter {
        type Error = FakeRejection;

        async fn create_book(&self, draft: &DraftBook) -> Result<Book, FakeRejection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FakeRejection);
            }
            Ok(Book {
                id: 42,
                title: draft.title.clone(),
                author_id: draft.author_id,
                author_name: None,
                isbn: draft.isbn.clone(),
                published_year: draft.published_year,
                description: Some(draft.description.clone()),
                cover_url: Some(draft.cover_url.clone()),
                categories: None,
            })
        }
    }

    fn filled_form() -> AddBookForm {
        let mut form = AddBookForm::new(Vec::new(), 2024);
        form.edit(BookField::Title, "The Dispossessed");
        form.edit(BookField::AuthorId, "2");
        form.edit(BookField::Isbn, "978-0-06-051275-7");
        form.edit(BookField::PublishedYear, "1974");
        form.edit(BookField::Description, "An ambiguous utopia.");
        form.edit(BookField::CoverUrl, "https://example.com/td.jpg");
        form
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_writer() {
        let mut form = AddBookForm::new(Vec::new(), 2024);
        let writer = FakeWriter::new(false);

        let outcome = form.submit(&writer, 2024).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid));
        assert_eq!(writer.calls(), 0);
        assert!(form.errors().get(BookField::Title).is_some());
    }

    #[tokio::test]
    async fn successful_submit_resets_to_a_blank_error_free_form() {
        let mut form = filled_form();
        let writer = FakeWriter::new(false);

        let outcome = form.submit(&writer, 2024).await.unwrap();
        let SubmitOutcome::Created(book) = outcome else {
            panic!("expected creation");
        };
        assert_eq!(book.id, 42);
        assert_eq!(book.title, "The Dispossessed");
        assert_eq!(writer.calls(), 1);

        assert_eq!(form.draft(), &DraftBook::blank(2024));
        assert!(form.errors().is_empty());
        assert!(form.search().results().is_empty());
    }

    #[tokio::test]
    async fn writer_failure_preserves_the_draft_for_retry() {
        let mut form = filled_form();
        let writer = FakeWriter::new(true);

        let result = form.submit(&writer, 2024).await;
        assert!(result.is_err());
        assert_eq!(writer.calls(), 1);
        assert_eq!(form.draft().title, "The Dispossessed");
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn resubmission_after_reset_validates_the_blank_draft() {
        let mut form = filled_form();
        let writer = FakeWriter::new(false);
        form.submit(&writer, 2024).await.unwrap();

        // The reset draft is blank, so an immediate resubmit is invalid
        // again rather than double-creating.
        let outcome = form.submit(&writer, 2024).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid));
        assert_eq!(writer.calls(), 1);
    }
}
