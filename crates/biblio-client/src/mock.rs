//! In-memory stand-in for the author side of the catalog API.
//!
//! A fixed roster served after an artificial delay, so the rest of the
//! stack can be exercised without a running persistence API.

use std::convert::Infallible;
use std::sync::Mutex;
use std::time::Duration;

use biblio_core::{Author, CreateAuthorInput, RosterProvider};
use tracing::debug;

const DEFAULT_DELAY_MS: u64 = 300;

/// Static author roster with simulated latency.
pub struct MockAuthorService {
    authors: Mutex<Vec<Author>>,
    delay: Duration,
}

impl MockAuthorService {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_DELAY_MS))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            authors: Mutex::new(seed_roster()),
            delay,
        }
    }

    pub async fn list_authors(&self) -> Vec<Author> {
        tokio::time::sleep(self.delay).await;
        let authors = self.authors.lock().unwrap().clone();
        debug!(count = authors.len(), "mock roster served");
        authors
    }

    pub async fn create_author(&self, input: &CreateAuthorInput) -> Author {
        tokio::time::sleep(self.delay).await;
        let mut authors = self.authors.lock().unwrap();
        let next_id = authors.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let author = Author {
            id: next_id,
            name: input.name.clone(),
            bio: input.bio.clone(),
            birth_year: input.birth_year,
            country: input.country.clone(),
            books: None,
        };
        authors.push(author.clone());
        author
    }
}

impl Default for MockAuthorService {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterProvider for MockAuthorService {
    type Error = Infallible;

    async fn list_authors(&self) -> Result<Vec<Author>, Infallible> {
        Ok(MockAuthorService::list_authors(self).await)
    }
}

fn seed_author(id: i64, name: &str, birth_year: i32, country: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
        bio: None,
        birth_year: Some(birth_year),
        country: Some(country.to_string()),
        books: None,
    }
}

fn seed_roster() -> Vec<Author> {
    vec![
        seed_author(1, "Frank Herbert", 1920, "US"),
        seed_author(2, "Ursula K. Le Guin", 1929, "US"),
        seed_author(3, "Jane Austen", 1775, "GB"),
        seed_author(4, "Chinua Achebe", 1930, "NG"),
        seed_author(5, "Haruki Murakami", 1949, "JP"),
    ]
}
