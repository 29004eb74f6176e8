//! URL classification predicates.
//!
//! All predicates operate on parsed URL components rather than raw string or
//! regex matching, so adversarial paths cannot spoof a hostname check.

use url::Url;

/// Reserved namespace for mirrored and optimized assets.
pub const OPTIMIZED_NAMESPACE: &str = "notion-images";

/// Classification of a source URL relative to the gateway's own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlClass {
    /// The URL points into the gateway's own bucket
    pub is_own_bucket: bool,
    /// The URL points at an object under the optimized namespace,
    /// content-addressed by a SHA-256 hash
    pub is_already_optimized: bool,
}

/// Prefix a bare URL with `https://` when the scheme is missing.
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Check that a path segment is exactly a 64-character lowercase hex hash.
///
/// This is a structural check on one segment, never a substring search.
pub fn is_hex_hash(segment: &str) -> bool {
    segment.len() == 64
        && segment
            .chars()
            .all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Does this URL point at one of Notion's file-hosting domains?
///
/// These are the foreign originals worth mirroring into owned storage.
pub fn is_mirror_candidate(url: &str) -> bool {
    let Ok(parsed) = Url::parse(&ensure_scheme(url)) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    if host == "file.notion.so" || host == "secure.notion-static.com" {
        return true;
    }
    if host.starts_with("prod-files-secure.s3.") && host.ends_with(".amazonaws.com") {
        return true;
    }
    // Path-style buckets: s3.<region>.amazonaws.com/secure.notion-static.com/...
    if host.starts_with("s3.") && host.ends_with(".amazonaws.com") {
        let mut segments = parsed.path_segments().into_iter().flatten();
        return segments.next() == Some("secure.notion-static.com");
    }
    false
}

/// Parse a store-native URL of the form
/// `https://<bucket>.s3.<region>.amazonaws.com/<key>` into its coordinates.
///
/// Returns `(bucket, region, key)`; the region is absent for legacy
/// `<bucket>.s3.amazonaws.com` hosts. Presigned URLs (any query string) are
/// not store-native: they must be fetched over plain HTTP.
pub fn parse_native_url(parsed: &Url) -> Option<(String, Option<String>, String)> {
    if parsed.query().is_some() {
        return None;
    }
    let host = parsed.host_str()?;
    let labels: Vec<&str> = host.split('.').collect();
    let s3_at = labels.iter().position(|label| *label == "s3")?;
    if s3_at == 0 {
        return None;
    }
    let bucket = labels[..s3_at].join(".");

    let region = match &labels[s3_at + 1..] {
        ["amazonaws", "com"] => None,
        [region, "amazonaws", "com"] => Some((*region).to_string()),
        _ => return None,
    };

    let key = parsed.path().trim_start_matches('/');
    if key.is_empty() {
        return None;
    }
    Some((bucket, region, key.to_string()))
}

/// Pure own-bucket / already-optimized classification for one gateway.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    public_base: String,
    base_path: String,
    native_host: String,
}

impl UrlClassifier {
    /// Create a classifier for the given public base URL and native
    /// `<bucket>.s3.<region>.amazonaws.com` host.
    pub fn new(public_base: impl Into<String>, native_host: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        let base_path = Url::parse(&ensure_scheme(&public_base))
            .map(|base| base.path().trim_end_matches('/').to_string())
            .unwrap_or_default();
        Self {
            public_base,
            base_path,
            native_host: native_host.into(),
        }
    }

    /// The public base URL this classifier treats as owned.
    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// Classify a URL without any I/O.
    pub fn classify(&self, url: &str) -> UrlClass {
        let normalized = ensure_scheme(url);
        let Ok(parsed) = Url::parse(&normalized) else {
            return UrlClass::default();
        };

        // Prefix match includes the slash so a look-alike domain that merely
        // starts with the public base cannot pass.
        let under_base = normalized.starts_with(&format!("{}/", self.public_base));
        let is_own_bucket = under_base || parsed.host_str() == Some(self.native_host.as_str());
        if !is_own_bucket {
            return UrlClass::default();
        }

        // The object key is relative to the base's own path, so a base like
        // `https://cdn.example.com/assets` still recognizes its uploads.
        // Native-host URLs carry the key at the path root.
        let path = parsed.path();
        let key = if under_base {
            path.strip_prefix(self.base_path.as_str()).unwrap_or(path)
        } else {
            path
        };

        let mut segments = key.trim_start_matches('/').split('/');
        let in_namespace = segments.next() == Some(OPTIMIZED_NAMESPACE);
        let is_already_optimized = in_namespace
            && segments
                .next()
                .map(|file| {
                    let stem = file.split_once('.').map(|(s, _)| s).unwrap_or(file);
                    is_hex_hash(stem)
                })
                .unwrap_or(false);

        UrlClass {
            is_own_bucket,
            is_already_optimized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> UrlClassifier {
        UrlClassifier::new(
            "https://photos.s3.us-east-1.amazonaws.com",
            "photos.s3.us-east-1.amazonaws.com",
        )
    }

    #[test]
    fn hex_hash_rejects_wrong_lengths_and_characters() {
        assert!(is_hex_hash(&"a".repeat(64)));
        assert!(!is_hex_hash(&"a".repeat(63)));
        assert!(!is_hex_hash(&"A".repeat(64)));
        assert!(!is_hex_hash(&"g".repeat(64)));
    }

    #[test]
    fn optimized_requires_namespace_and_hash() {
        let c = classifier();
        let hash = "c".repeat(64);

        let optimized =
            format!("https://photos.s3.us-east-1.amazonaws.com/notion-images/{hash}.png");
        assert!(c.classify(&optimized).is_already_optimized);

        let wrong_namespace =
            format!("https://photos.s3.us-east-1.amazonaws.com/uploads/{hash}.png");
        let class = c.classify(&wrong_namespace);
        assert!(class.is_own_bucket);
        assert!(!class.is_already_optimized);

        let not_a_hash =
            "https://photos.s3.us-east-1.amazonaws.com/notion-images/avatar.png".to_string();
        assert!(!c.classify(&not_a_hash).is_already_optimized);
    }

    #[test]
    fn base_with_a_path_recognizes_its_own_uploads() {
        let c = UrlClassifier::new(
            "https://cdn.example.com/assets",
            "photos.s3.us-east-1.amazonaws.com",
        );
        let hash = "c".repeat(64);

        let uploaded = format!("https://cdn.example.com/assets/notion-images/{hash}.webp");
        let class = c.classify(&uploaded);
        assert!(class.is_own_bucket);
        assert!(class.is_already_optimized);

        let outside = format!("https://cdn.example.com/other/notion-images/{hash}.webp");
        assert_eq!(c.classify(&outside), UrlClass::default());

        // Native-host URLs keep the key at the path root either way.
        let native =
            format!("https://photos.s3.us-east-1.amazonaws.com/notion-images/{hash}.webp");
        assert!(c.classify(&native).is_already_optimized);
    }

    #[test]
    fn foreign_host_is_never_own_bucket() {
        let c = classifier();
        let hash = "c".repeat(64);
        let foreign = format!("https://evil.example.com/notion-images/{hash}.png");
        assert_eq!(c.classify(&foreign), UrlClass::default());
    }

    #[test]
    fn notion_hosts_are_mirror_candidates() {
        assert!(is_mirror_candidate(
            "https://prod-files-secure.s3.us-west-2.amazonaws.com/abc/icon.png"
        ));
        assert!(is_mirror_candidate(
            "https://s3.us-west-2.amazonaws.com/secure.notion-static.com/abc/icon.png"
        ));
        assert!(is_mirror_candidate("https://file.notion.so/f/abc/icon.png"));
        assert!(!is_mirror_candidate("https://example.com/icon.png"));
    }

    #[test]
    fn native_url_parses_bucket_region_key() {
        let url = Url::parse("https://photos.s3.us-east-1.amazonaws.com/notion-images/a.png")
            .unwrap();
        let (bucket, region, key) = parse_native_url(&url).unwrap();
        assert_eq!(bucket, "photos");
        assert_eq!(region.as_deref(), Some("us-east-1"));
        assert_eq!(key, "notion-images/a.png");
    }

    #[test]
    fn presigned_urls_are_not_native() {
        let url = Url::parse(
            "https://prod-files-secure.s3.us-west-2.amazonaws.com/a.png?X-Amz-Signature=abc",
        )
        .unwrap();
        assert!(parse_native_url(&url).is_none());
    }
}
