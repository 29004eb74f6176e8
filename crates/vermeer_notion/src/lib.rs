//! Notion content-database client for Vermeer.
//!
//! Read side: paginated database queries with typed property extraction.
//! Write side: targeted partial updates that point a single image reference
//! (page icon, icon file-list, or URL property) at a new storage location
//! while leaving every sibling field untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use vermeer_notion::{ContentApi, NotionClient, QuerySort, SortDirection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let notion = NotionClient::from_env()?;
//! let pages = notion
//!     .query_collection("a-database-id", &QuerySort::by_property("Name", SortDirection::Ascending))
//!     .await?;
//! for page in &pages {
//!     if let Some(icon) = page.icon.as_ref().and_then(|icon| icon.url()) {
//!         println!("{}: {}", page.id, icon);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod collections;
mod types;

pub use client::NotionClient;
pub use collections::{CollectionKind, CollectionSpec};
pub use types::{
    DateRange, ExternalFile, FileReference, HostedFile, Page, PageIcon, PropertyValue,
    QueryResponse, QuerySort, RichTextSpan, SelectOption, SortDirection,
};
pub use vermeer_error::{NotionError, NotionErrorKind};

use vermeer_error::VermeerResult;

/// Trait for the content database.
///
/// The orchestrator only talks to this trait; tests substitute an in-memory
/// implementation. All updates are idempotent partial updates — re-applying
/// the same URL is a no-op from the content system's perspective.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync {
    /// Query a database to exhaustion in the declared sort order.
    async fn query_collection(
        &self,
        database_id: &str,
        sort: &QuerySort,
    ) -> VermeerResult<Vec<Page>>;

    /// Point the page-level icon at a new external URL.
    async fn update_page_icon(&self, page_id: &str, url: &str) -> VermeerResult<()>;

    /// Replace a file-list icon property with a single external entry.
    async fn update_icon_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()>;

    /// Overwrite a URL-valued property.
    async fn update_url_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()>;
}
