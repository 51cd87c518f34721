//! Title-prefix search against the external book-metadata index, and the
//! normalization of its heterogeneous volume records into [`Suggestion`]s.
//!
//! The public `search` never errors: transport, status, and parse failures
//! are logged and absorbed into [`LookupOutcome::Failed`], which callers
//! render as an empty suggestion list. Result order is the index's own; no
//! re-ranking, no caching.

use biblio_core::{LookupOutcome, Suggestion, SuggestionSource, parse_year_prefix};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

const VOLUMES_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";
const MAX_RESULTS: u32 = 20;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("metadata index returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for the metadata search client.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Optional access key; without it requests go out unauthenticated.
    pub api_key: Option<String>,
    /// Country code the index scopes availability by.
    pub country: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            country: "US".to_string(),
        }
    }
}

/// Client for the external volumes search endpoint.
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: String,
    config: MetadataConfig,
}

impl MetadataClient {
    pub fn new(config: MetadataConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: VOLUMES_ENDPOINT.to_string(),
            config,
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Search volumes by title fragment, absorbing every failure.
    pub async fn search(&self, query: &str) -> LookupOutcome {
        if query.trim().is_empty() {
            return LookupOutcome::Results(Vec::new());
        }

        match self.try_search(query).await {
            Ok(suggestions) => LookupOutcome::Results(suggestions),
            Err(error) => {
                warn!(query = %query, error = %error, "metadata lookup failed");
                LookupOutcome::Failed
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Suggestion>, LookupError> {
        let params = query_params(query, &self.config);

        info!(query = %query, "searching metadata index");
        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let page: VolumesPage = serde_json::from_str(&body)?;
        let suggestions: Vec<Suggestion> = page
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize)
            .collect();
        info!(count = suggestions.len(), "metadata lookup resolved");
        Ok(suggestions)
    }
}

impl SuggestionSource for MetadataClient {
    async fn search(&self, query: &str) -> LookupOutcome {
        MetadataClient::search(self, query).await
    }
}

/// Query parameters for a title search, in wire order.
fn query_params(query: &str, config: &MetadataConfig) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", format!("intitle:{query}")),
        ("country", config.country.clone()),
        ("maxResults", MAX_RESULTS.to_string()),
        ("printType", "books".to_string()),
        ("projection", "lite".to_string()),
    ];
    if let Some(key) = &config.api_key {
        params.push(("key", key.clone()));
    }
    params
}

// ── Raw wire model ──

#[derive(Debug, Deserialize)]
struct VolumesPage {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    description: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: Option<String>,
    identifier: Option<String>,
}

/// Normalize one raw volume into a [`Suggestion`].
///
/// Volumes with no metadata container at all are dropped; a missing title
/// becomes the empty string. ISBN-13 wins over any other identifier scheme,
/// larger thumbnails win over small ones, and insecure thumbnail URLs are
/// upgraded to https. Pure and idempotent.
fn normalize(volume: Volume) -> Option<Suggestion> {
    let info = volume.volume_info?;

    let identifiers = info.industry_identifiers.unwrap_or_default();
    let isbn13 = identifiers
        .iter()
        .find(|id| id.kind.as_deref() == Some("ISBN_13"))
        .and_then(|id| id.identifier.clone());
    let other_isbn = identifiers
        .iter()
        .find(|id| id.kind.as_deref().is_some_and(|kind| kind != "ISBN_13"))
        .and_then(|id| id.identifier.clone());

    let published_year = info.published_date.as_deref().and_then(parse_year_prefix);

    let cover_url = info
        .image_links
        .as_ref()
        .and_then(|links| links.thumbnail.clone().or_else(|| links.small_thumbnail.clone()))
        .map(|url| match url.strip_prefix("http:") {
            Some(rest) => format!("https:{rest}"),
            None => url,
        });

    let authors = info.authors.unwrap_or_default();
    let primary_author = authors.first().cloned();

    Some(Suggestion {
        title: info.title.unwrap_or_default(),
        authors,
        primary_author,
        description: info.description,
        published_year,
        published_date: info.published_date,
        cover_url,
        isbn13: isbn13.clone(),
        isbn: isbn13.or(other_isbn),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume_from(json: &str) -> Volume {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalize_prefers_isbn13() {
        let volume = volume_from(
            r#"{
                "volumeInfo": {
                    "title": "Dune",
                    "industryIdentifiers": [
                        {"type": "ISBN_10", "identifier": "0441172717"},
                        {"type": "ISBN_13", "identifier": "9780441172719"}
                    ]
                }
            }"#,
        );
        let s = normalize(volume).unwrap();
        assert_eq!(s.isbn13.as_deref(), Some("9780441172719"));
        assert_eq!(s.isbn.as_deref(), Some("9780441172719"));
    }

    #[test]
    fn normalize_falls_back_to_other_identifier() {
        let volume = volume_from(
            r#"{
                "volumeInfo": {
                    "title": "Dune",
                    "industryIdentifiers": [
                        {"type": "ISBN_10", "identifier": "0441172717"}
                    ]
                }
            }"#,
        );
        let s = normalize(volume).unwrap();
        assert!(s.isbn13.is_none());
        assert_eq!(s.isbn.as_deref(), Some("0441172717"));
    }

    #[test]
    fn normalize_parses_year_prefix_without_panicking() {
        for (date, expected) in [
            ("1999", Some(1999)),
            ("2003-05-01", Some(2003)),
            ("99", None),
            ("abcd", None),
        ] {
            let volume = volume_from(&format!(
                r#"{{"volumeInfo": {{"title": "X", "publishedDate": "{date}"}}}}"#
            ));
            let s = normalize(volume).unwrap();
            assert_eq!(s.published_year, expected, "date {date:?}");
            assert_eq!(s.published_date.as_deref(), Some(date));
        }
    }

    #[test]
    fn normalize_upgrades_insecure_thumbnails() {
        let volume = volume_from(
            r#"{
                "volumeInfo": {
                    "title": "X",
                    "imageLinks": {"thumbnail": "http://books.example/cover.jpg"}
                }
            }"#,
        );
        let s = normalize(volume).unwrap();
        assert_eq!(s.cover_url.as_deref(), Some("https://books.example/cover.jpg"));
    }

    #[test]
    fn normalize_prefers_large_thumbnail() {
        let volume = volume_from(
            r#"{
                "volumeInfo": {
                    "title": "X",
                    "imageLinks": {
                        "smallThumbnail": "https://books.example/small.jpg",
                        "thumbnail": "https://books.example/large.jpg"
                    }
                }
            }"#,
        );
        let s = normalize(volume).unwrap();
        assert_eq!(s.cover_url.as_deref(), Some("https://books.example/large.jpg"));
    }

    #[test]
    fn volume_without_info_is_dropped() {
        assert!(normalize(volume_from("{}")).is_none());
    }

    #[test]
    fn missing_title_becomes_empty_string() {
        let volume = volume_from(r#"{"volumeInfo": {"authors": ["A. Nonymous"]}}"#);
        let s = normalize(volume).unwrap();
        assert_eq!(s.title, "");
        assert_eq!(s.primary_author.as_deref(), Some("A. Nonymous"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let json = r#"{
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publishedDate": "1965-08-01",
                "imageLinks": {"thumbnail": "http://books.example/dune.jpg"},
                "industryIdentifiers": [{"type": "ISBN_13", "identifier": "9780441172719"}]
            }
        }"#;
        let first = normalize(volume_from(json)).unwrap();
        let second = normalize(volume_from(json)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn query_params_include_key_only_when_configured() {
        let without = query_params("harry", &MetadataConfig::default());
        assert_eq!(
            without,
            vec![
                ("q", "intitle:harry".to_string()),
                ("country", "US".to_string()),
                ("maxResults", "20".to_string()),
                ("printType", "books".to_string()),
                ("projection", "lite".to_string()),
            ]
        );

        let config = MetadataConfig {
            api_key: Some("sekrit".into()),
            country: "GB".into(),
        };
        let with = query_params("harry", &config);
        assert_eq!(with.last(), Some(&("key", "sekrit".to_string())));
        assert!(with.contains(&("country", "GB".to_string())));
    }

    #[test]
    fn page_without_items_yields_no_suggestions() {
        let page: VolumesPage = serde_json::from_str(r#"{"totalItems": 0}"#).unwrap();
        assert!(page.items.is_none());
    }

    #[tokio::test]
    async fn blank_query_short_circuits() {
        let client = MetadataClient::new(MetadataConfig::default())
            .with_base_url("http://127.0.0.1:1/unreachable");
        match client.search("   ").await {
            LookupOutcome::Results(items) => assert!(items.is_empty()),
            LookupOutcome::Failed => panic!("blank query must not hit the network"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_absorbed() {
        let client = MetadataClient::new(MetadataConfig::default())
            .with_base_url("http://127.0.0.1:1/unreachable");
        assert!(client.search("dune").await.is_failed());
    }
}
