//! Notion API client.

use crate::{ContentApi, Page, QueryResponse, QuerySort};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, instrument};
use vermeer_error::{ConfigError, NotionError, NotionErrorKind, VermeerResult};

const NOTION_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client.
///
/// One instance per run, shared by reference; stateless between calls apart
/// from connection reuse.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    token: String,
}

impl NotionClient {
    /// Creates a new Notion client with an integration token.
    pub fn new(token: impl Into<String>) -> Self {
        debug!("Creating new Notion client");
        Self {
            client: Client::new(),
            token: token.into(),
        }
    }

    /// Creates a client from the `NOTION_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the token is not set.
    pub fn from_env() -> VermeerResult<Self> {
        let token = std::env::var("NOTION_TOKEN")
            .map_err(|_| ConfigError::new("NOTION_TOKEN is not set"))?;
        Ok(Self::new(token))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, NotionError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Notion API returned error");
        Err(NotionError::new(NotionErrorKind::Api {
            status: status.as_u16(),
            message: body,
        }))
    }

    async fn patch_page(&self, page_id: &str, body: serde_json::Value) -> VermeerResult<()> {
        let response = self
            .client
            .patch(format!("{NOTION_API_URL}/pages/{page_id}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send page update");
                NotionError::new(NotionErrorKind::Http(format!("Request failed: {e}")))
            })?;

        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContentApi for NotionClient {
    /// Query a database to exhaustion, following continuation cursors.
    ///
    /// Result order equals the declared sort order; pagination is strictly
    /// sequential.
    #[instrument(skip(self, sort))]
    async fn query_collection(
        &self,
        database_id: &str,
        sort: &QuerySort,
    ) -> VermeerResult<Vec<Page>> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "sorts": [sort] });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response = self
                .client
                .post(format!("{NOTION_API_URL}/databases/{database_id}/query"))
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    error!(error = ?e, "Failed to send database query");
                    NotionError::new(NotionErrorKind::Http(format!("Request failed: {e}")))
                })?;

            let batch: QueryResponse = Self::check(response)
                .await?
                .json()
                .await
                .map_err(|e| {
                    error!(error = ?e, "Failed to parse query response");
                    NotionError::new(NotionErrorKind::Parse(e.to_string()))
                })?;

            pages.extend(batch.results);
            if !batch.has_more {
                break;
            }
            cursor = batch.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        debug!(count = pages.len(), "Queried collection");
        Ok(pages)
    }

    /// Point the page-level icon at a new external URL.
    #[instrument(skip(self))]
    async fn update_page_icon(&self, page_id: &str, url: &str) -> VermeerResult<()> {
        self.patch_page(
            page_id,
            json!({ "icon": { "type": "external", "external": { "url": url } } }),
        )
        .await
    }

    /// Replace a file-list icon property with a single external entry.
    #[instrument(skip(self))]
    async fn update_icon_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()> {
        self.patch_page(
            page_id,
            json!({
                "properties": {
                    property: {
                        "files": [
                            { "type": "external", "name": "icon", "external": { "url": url } }
                        ]
                    }
                }
            }),
        )
        .await
    }

    /// Overwrite a URL-valued property.
    #[instrument(skip(self))]
    async fn update_url_property(
        &self,
        page_id: &str,
        property: &str,
        url: &str,
    ) -> VermeerResult<()> {
        self.patch_page(page_id, json!({ "properties": { property: { "url": url } } }))
            .await
    }
}
