//! HTTP client for the catalog persistence API.
//!
//! The API's payloads are permissive: list endpoints answer either an
//! `{"value": [...], "count": n}` envelope or a bare array, and every field
//! of a record may be absent. Raw payloads are mapped into the normalized
//! `biblio-core` records here, back-filling from the caller's input where
//! the API does not echo a field (description, cover, author bio).

use biblio_core::{
    Author, Book, BookSummary, BookWriter, Clock, CreateAuthorInput, DraftBook, RosterProvider,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::clock::SystemClock;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog API returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the books/authors persistence API.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// `base_url` like `http://localhost:5000` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        let url = format!("{}/books", self.base_url);
        info!(url = %url, "fetching books");
        let body = self.get_text(&url).await?;
        let page: ListResponse<ApiBook> = serde_json::from_str(&body)?;
        let year = SystemClock.current_year();
        let books: Vec<Book> = page
            .items()
            .into_iter()
            .map(|raw| map_book(raw, None, year))
            .collect();
        info!(count = books.len(), "fetched books");
        Ok(books)
    }

    pub async fn create_book(&self, draft: &DraftBook) -> Result<Book, CatalogError> {
        let url = format!("{}/books", self.base_url);
        let payload = CreateBookBody::from_draft(draft);

        info!(url = %url, title = %draft.title, "creating book");
        let resp = self.client.post(&url).json(&payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let raw: ApiBook = serde_json::from_str(&resp.text().await?)?;
        Ok(map_book(raw, Some(draft), SystemClock.current_year()))
    }

    /// Ask the API to import a record it can look up by ISBN itself.
    pub async fn import_by_isbn(&self, isbn: &str) -> Result<Book, CatalogError> {
        let url = format!("{}/books/import/isbn/{}", self.base_url, isbn);

        info!(url = %url, "importing book by ISBN");
        let resp = self.client.post(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let raw: ApiBook = serde_json::from_str(&resp.text().await?)?;
        Ok(map_book(raw, None, SystemClock.current_year()))
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, CatalogError> {
        let url = format!("{}/authors", self.base_url);
        info!(url = %url, "fetching authors");
        let body = self.get_text(&url).await?;
        let page: ListResponse<ApiAuthor> = serde_json::from_str(&body)?;
        let year = SystemClock.current_year();
        let authors: Vec<Author> = page
            .items()
            .into_iter()
            .map(|raw| map_author(raw, None, year))
            .collect();
        info!(count = authors.len(), "fetched authors");
        Ok(authors)
    }

    pub async fn create_author(&self, input: &CreateAuthorInput) -> Result<Author, CatalogError> {
        let url = format!("{}/authors", self.base_url);

        info!(url = %url, name = %input.name, "creating author");
        // The API only accepts the name; the rest stays client-side.
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "name": input.name }))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let raw: ApiAuthor = serde_json::from_str(&resp.text().await?)?;
        Ok(map_author(raw, Some(input), SystemClock.current_year()))
    }

    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.text().await?)
    }
}

impl BookWriter for CatalogClient {
    type Error = CatalogError;

    async fn create_book(&self, draft: &DraftBook) -> Result<Book, CatalogError> {
        CatalogClient::create_book(self, draft).await
    }
}

impl RosterProvider for CatalogClient {
    type Error = CatalogError;

    async fn list_authors(&self) -> Result<Vec<Author>, CatalogError> {
        CatalogClient::list_authors(self).await
    }
}

// ── Raw wire model ──

/// List endpoints answer `{"value": [...], "count": n}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Envelope { value: Option<Vec<T>> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    fn items(self) -> Vec<T> {
        match self {
            Self::Envelope { value } => value.unwrap_or_default(),
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBook {
    id: Option<i64>,
    title: Option<String>,
    year: Option<i32>,
    isbn: Option<String>,
    author_id: Option<i64>,
    author: Option<ApiAuthorRef>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiAuthorRef {
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAuthor {
    id: Option<i64>,
    name: Option<String>,
    bio: Option<String>,
    birth_year: Option<i32>,
    country: Option<String>,
    books: Option<Vec<Option<ApiBook>>>,
}

/// POST body for book creation; the API takes `year`, not `publishedYear`,
/// and accepts neither description nor cover.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookBody {
    title: String,
    year: i32,
    author_id: i64,
    isbn: String,
}

impl CreateBookBody {
    fn from_draft(draft: &DraftBook) -> Self {
        Self {
            title: draft.title.clone(),
            year: draft.published_year,
            author_id: draft.author_id,
            isbn: draft.isbn.clone(),
        }
    }
}

fn map_book(raw: ApiBook, fallback: Option<&DraftBook>, default_year: i32) -> Book {
    Book {
        id: raw.id.unwrap_or(0),
        title: raw
            .title
            .or_else(|| fallback.map(|d| d.title.clone()))
            .unwrap_or_default(),
        author_id: raw
            .author_id
            .or_else(|| fallback.map(|d| d.author_id))
            .unwrap_or(0),
        author_name: raw.author.and_then(|a| a.name),
        isbn: raw
            .isbn
            .or_else(|| fallback.map(|d| d.isbn.clone()))
            .unwrap_or_default(),
        published_year: raw
            .year
            .or_else(|| fallback.map(|d| d.published_year))
            .unwrap_or(default_year),
        description: fallback
            .map(|d| d.description.clone())
            .filter(|s| !s.is_empty()),
        cover_url: fallback
            .map(|d| d.cover_url.clone())
            .filter(|s| !s.is_empty()),
        categories: raw.categories,
    }
}

fn map_author(raw: ApiAuthor, fallback: Option<&CreateAuthorInput>, default_year: i32) -> Author {
    let author_id = raw.id.unwrap_or(0);
    let books = raw.books.map(|entries| {
        entries
            .into_iter()
            .flatten()
            .map(|b| BookSummary {
                id: b.id.unwrap_or(0),
                title: b.title.unwrap_or_default(),
                year: b.year.unwrap_or(default_year),
                isbn: b.isbn.unwrap_or_default(),
                author_id: b.author_id.unwrap_or(author_id),
            })
            .collect()
    });

    Author {
        id: author_id,
        name: raw
            .name
            .or_else(|| fallback.map(|input| input.name.clone()))
            .unwrap_or_else(|| "Unknown Author".to_string()),
        bio: raw.bio.or_else(|| fallback.and_then(|input| input.bio.clone())),
        birth_year: raw.birth_year.or_else(|| fallback.and_then(|input| input.birth_year)),
        country: raw
            .country
            .or_else(|| fallback.and_then(|input| input.country.clone())),
        books,
    }
}
