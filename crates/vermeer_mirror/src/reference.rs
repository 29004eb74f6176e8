//! Image references scanned out of content pages.

use vermeer_notion::{CollectionSpec, Page};

/// Which field of the owning document holds the image.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FieldKind {
    /// The page-level icon
    #[display("page icon")]
    PageIcon,
    /// A file-list property used as an icon
    #[display("icon property '{}'", _0)]
    IconProperty(String),
    /// A URL-valued property holding article imagery
    #[display("image property '{}'", _0)]
    UrlProperty(String),
}

/// A located pointer to an image inside one document.
///
/// Constructed fresh on every scan, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Where the image currently lives
    pub source_url: String,
    /// Id of the single owning document
    pub owner_page_id: String,
    /// Which field the reference came from
    pub field: FieldKind,
}

/// Scan a page for image references, in the fixed per-document order:
/// icon property, then page icon, then image property.
pub fn scan_page(page: &Page, spec: &CollectionSpec) -> Vec<ImageReference> {
    let mut references = Vec::new();

    if let Some(property) = spec.icon_property {
        if let Some(url) = page
            .properties
            .get(property)
            .map(|value| value.file_urls())
            .and_then(|urls| urls.first().map(|url| url.to_string()))
        {
            references.push(ImageReference {
                source_url: url,
                owner_page_id: page.id.clone(),
                field: FieldKind::IconProperty(property.to_string()),
            });
        }
    }

    if spec.use_page_icon {
        if let Some(url) = page.icon.as_ref().and_then(|icon| icon.url()) {
            references.push(ImageReference {
                source_url: url.to_string(),
                owner_page_id: page.id.clone(),
                field: FieldKind::PageIcon,
            });
        }
    }

    if let Some(property) = spec.image_property {
        if let Some(url) = page.properties.get(property).and_then(|value| value.as_url()) {
            references.push(ImageReference {
                source_url: url.to_string(),
                owner_page_id: page.id.clone(),
                field: FieldKind::UrlProperty(property.to_string()),
            });
        }
    }

    references
}
