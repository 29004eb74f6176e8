//! Wire types for the Notion API.
//!
//! Property values arrive as a loosely shaped object graph; each kind is
//! modeled as a tagged variant with an extraction helper returning an
//! `Option` instead of risking an invalid access.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One page of a paginated database query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Pages in this batch
    pub results: Vec<Page>,
    /// Whether another batch follows
    #[serde(default)]
    pub has_more: bool,
    /// Opaque continuation cursor for the next batch
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A document in a Notion database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page id
    pub id: String,
    /// Page-level icon, if any
    #[serde(default)]
    pub icon: Option<PageIcon>,
    /// Typed properties by name
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// An externally hosted file, referenced by URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalFile {
    /// The file URL
    pub url: String,
}

/// A file hosted by Notion itself; the URL is presigned and expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedFile {
    /// The presigned file URL
    pub url: String,
    /// When the presigned URL stops working
    #[serde(default)]
    pub expiry_time: Option<String>,
}

/// Page-level icon variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageIcon {
    /// Icon referencing an external URL
    External {
        /// The external file
        external: ExternalFile,
    },
    /// Emoji icon, no image involved
    Emoji {
        /// The emoji character
        emoji: String,
    },
    /// Icon hosted by Notion
    File {
        /// The hosted file
        file: HostedFile,
    },
}

impl PageIcon {
    /// The image URL behind this icon, if it has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            PageIcon::External { external } => Some(&external.url),
            PageIcon::File { file } => Some(&file.url),
            PageIcon::Emoji { .. } => None,
        }
    }
}

/// One span of rich text; only the rendered text matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextSpan {
    /// Rendered plain text
    #[serde(default)]
    pub plain_text: String,
}

/// A select or multi-select option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    /// Option label
    pub name: String,
}

/// A date property value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date, ISO-8601
    pub start: Option<String>,
    /// End date for ranges
    #[serde(default)]
    pub end: Option<String>,
}

/// One entry of a file-list property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileReference {
    /// External URL entry
    External {
        /// Display name
        #[serde(default)]
        name: Option<String>,
        /// The external file
        external: ExternalFile,
    },
    /// Notion-hosted entry
    File {
        /// Display name
        #[serde(default)]
        name: Option<String>,
        /// The hosted file
        file: HostedFile,
    },
}

impl FileReference {
    /// The URL behind this entry.
    pub fn url(&self) -> &str {
        match self {
            FileReference::External { external, .. } => &external.url,
            FileReference::File { file, .. } => &file.url,
        }
    }
}

/// A typed property value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Title property
    Title {
        /// Title spans
        title: Vec<RichTextSpan>,
    },
    /// Rich text property
    RichText {
        /// Text spans
        rich_text: Vec<RichTextSpan>,
    },
    /// URL property
    Url {
        /// The URL, absent when the field is empty
        url: Option<String>,
    },
    /// Select property
    Select {
        /// Chosen option
        select: Option<SelectOption>,
    },
    /// Multi-select property
    MultiSelect {
        /// Chosen options
        multi_select: Vec<SelectOption>,
    },
    /// Date property
    Date {
        /// The date value
        date: Option<DateRange>,
    },
    /// Number property
    Number {
        /// The number value
        number: Option<f64>,
    },
    /// File-list property
    Files {
        /// File entries
        files: Vec<FileReference>,
    },
    /// Any property kind this pipeline does not read
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Rendered text of a title or rich-text property.
    pub fn as_plain_text(&self) -> Option<String> {
        let spans = match self {
            PropertyValue::Title { title } => title,
            PropertyValue::RichText { rich_text } => rich_text,
            _ => return None,
        };
        Some(
            spans
                .iter()
                .map(|span| span.plain_text.as_str())
                .collect::<String>(),
        )
    }

    /// Value of a URL property.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            PropertyValue::Url { url } => url.as_deref(),
            _ => None,
        }
    }

    /// Label of a select property.
    pub fn as_select(&self) -> Option<&str> {
        match self {
            PropertyValue::Select { select } => select.as_ref().map(|o| o.name.as_str()),
            _ => None,
        }
    }

    /// Labels of a multi-select property.
    pub fn as_multi_select(&self) -> Vec<&str> {
        match self {
            PropertyValue::MultiSelect { multi_select } => {
                multi_select.iter().map(|o| o.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Start date of a date property.
    pub fn as_date_start(&self) -> Option<&str> {
        match self {
            PropertyValue::Date { date } => date.as_ref().and_then(|d| d.start.as_deref()),
            _ => None,
        }
    }

    /// Value of a number property.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number { number } => *number,
            _ => None,
        }
    }

    /// URLs of a file-list property, in declared order.
    pub fn file_urls(&self) -> Vec<&str> {
        match self {
            PropertyValue::Files { files } => files.iter().map(FileReference::url).collect(),
            _ => Vec::new(),
        }
    }
}

/// Sort applied to a database query.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuerySort {
    /// Property to sort by; mutually exclusive with `timestamp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Page timestamp to sort by (`created_time` or `last_edited_time`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Sort direction
    pub direction: SortDirection,
}

/// Query sort direction.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending
    #[display("ascending")]
    Ascending,
    /// Descending
    #[display("descending")]
    Descending,
}

impl QuerySort {
    /// Sort by a named property.
    pub fn by_property(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: Some(property.into()),
            timestamp: None,
            direction,
        }
    }

    /// Sort by page creation time.
    pub fn by_created_time(direction: SortDirection) -> Self {
        Self {
            property: None,
            timestamp: Some("created_time".to_string()),
            direction,
        }
    }
}
