//! Content collections and their scan profiles.

use crate::{QuerySort, SortDirection};
use tracing::info;

/// The content collections this site mirrors images for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CollectionKind {
    /// Long-form writing
    #[display("writing")]
    Writing,
    /// Stack: tools and apps in daily use
    #[display("stack")]
    Stack,
    /// Good websites worth linking
    #[display("good-websites")]
    GoodWebsites,
    /// Music listening history
    #[display("listening-history")]
    ListeningHistory,
    /// Ask-me-anything questions
    #[display("ama")]
    Ama,
    /// Design Details podcast episodes
    #[display("design-details-episodes")]
    DesignDetailsEpisodes,
    /// Talks and appearances
    #[display("speaking")]
    Speaking,
    /// App dissection teardowns
    #[display("app-dissection")]
    AppDissection,
}

impl CollectionKind {
    /// Environment variable holding this collection's database id.
    pub fn env_var(&self) -> &'static str {
        match self {
            CollectionKind::Writing => "NOTION_WRITING_DATABASE_ID",
            CollectionKind::Stack => "NOTION_STACK_DATABASE_ID",
            CollectionKind::GoodWebsites => "NOTION_GOOD_WEBSITES_DATABASE_ID",
            CollectionKind::ListeningHistory => "NOTION_LISTENING_HISTORY_DATABASE_ID",
            CollectionKind::Ama => "NOTION_AMA_DATABASE_ID",
            CollectionKind::DesignDetailsEpisodes => "NOTION_DESIGN_DETAILS_DATABASE_ID",
            CollectionKind::Speaking => "NOTION_SPEAKING_DATABASE_ID",
            CollectionKind::AppDissection => "NOTION_APP_DISSECTION_DATABASE_ID",
        }
    }
}

/// How one collection is queried and which of its fields carry images.
///
/// Within one document, mirroring order is fixed: icon property, then page
/// icon, then image property.
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    /// Which collection this is
    pub kind: CollectionKind,
    /// Database id from the environment
    pub database_id: String,
    /// Query sort; processing order equals query result order
    pub sort: QuerySort,
    /// Mirror the page-level icon
    pub use_page_icon: bool,
    /// File-list property holding an icon, mirrored with the thumbnail profile
    pub icon_property: Option<&'static str>,
    /// URL property holding article imagery, mirrored with the full profile
    pub image_property: Option<&'static str>,
}

impl CollectionSpec {
    fn for_kind(kind: CollectionKind, database_id: String) -> Self {
        let (sort, use_page_icon, icon_property, image_property) = match kind {
            CollectionKind::Writing => (
                QuerySort::by_property("Published", SortDirection::Descending),
                false,
                None,
                Some("Featured Image"),
            ),
            CollectionKind::Stack => (
                QuerySort::by_property("Name", SortDirection::Ascending),
                true,
                Some("Icon"),
                None,
            ),
            CollectionKind::GoodWebsites => (
                QuerySort::by_property("Name", SortDirection::Ascending),
                false,
                Some("Icon"),
                None,
            ),
            CollectionKind::ListeningHistory => (
                QuerySort::by_created_time(SortDirection::Descending),
                false,
                None,
                Some("Artwork"),
            ),
            CollectionKind::Ama => (
                QuerySort::by_created_time(SortDirection::Descending),
                true,
                None,
                None,
            ),
            CollectionKind::DesignDetailsEpisodes => (
                QuerySort::by_created_time(SortDirection::Descending),
                false,
                None,
                Some("Artwork"),
            ),
            CollectionKind::Speaking => (
                QuerySort::by_created_time(SortDirection::Descending),
                false,
                None,
                Some("Thumbnail"),
            ),
            CollectionKind::AppDissection => (
                QuerySort::by_property("Name", SortDirection::Ascending),
                true,
                Some("Icon"),
                None,
            ),
        };

        Self {
            kind,
            database_id,
            sort,
            use_page_icon,
            icon_property,
            image_property,
        }
    }

    /// Discover every collection with a database id in the environment.
    ///
    /// A missing id skips that collection with a note; it never fails the
    /// run.
    pub fn discover() -> Vec<Self> {
        use strum::IntoEnumIterator;

        CollectionKind::iter()
            .filter_map(|kind| match std::env::var(kind.env_var()) {
                Ok(id) if !id.is_empty() => Some(Self::for_kind(kind, id)),
                _ => {
                    info!(collection = %kind, "No database id configured, skipping");
                    None
                }
            })
            .collect()
    }

    /// Build the spec for one collection if its id is configured.
    pub fn discover_one(kind: CollectionKind) -> Option<Self> {
        match std::env::var(kind.env_var()) {
            Ok(id) if !id.is_empty() => Some(Self::for_kind(kind, id)),
            _ => {
                info!(collection = %kind, "No database id configured, skipping");
                None
            }
        }
    }
}
