//! Remote collaborators: the external book-metadata search endpoint and the
//! catalog persistence API, plus the chrono-backed clock.

pub mod catalog;
pub mod clock;
pub mod metadata;

#[cfg(feature = "mock")]
pub mod mock;

pub use catalog::{CatalogClient, CatalogError};
pub use clock::SystemClock;
pub use metadata::{LookupError, MetadataClient, MetadataConfig};

#[cfg(feature = "mock")]
pub use mock::MockAuthorService;
