//! Link records and their categorical options.
//!
//! Field order on both structs matches the on-disk form of the store
//! (`link`, `title`, `options` / `level`, `interest`, `type`), so the
//! serializer emits keys in a stable order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One submitted link entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The link URL
    pub link: String,

    /// Human-readable title
    pub title: String,

    /// Categorical attributes
    pub options: LinkOptions,
}

/// The three categorical attributes of a link record.
///
/// The values are plain strings; membership in the session vocabularies
/// is enforced at collection time, not here. Records persisted under an
/// older vocabulary stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Required experience level
    pub level: String,

    /// Interest area
    pub interest: String,

    /// Resource type (tutorial, article, ...)
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl LinkRecord {
    /// Create a new link record
    pub fn new(link: impl Into<String>, title: impl Into<String>, options: LinkOptions) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
            options,
        }
    }

    /// Ordering used for listings: by interest, then level, then type
    pub fn cmp_by_options(&self, other: &Self) -> Ordering {
        self.options
            .interest
            .cmp(&other.options.interest)
            .then_with(|| self.options.level.cmp(&other.options.level))
            .then_with(|| self.options.resource_type.cmp(&other.options.resource_type))
    }
}

impl LinkOptions {
    /// Create a new set of options
    pub fn new(
        level: impl Into<String>,
        interest: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            interest: interest.into(),
            resource_type: resource_type.into(),
        }
    }
}

impl fmt::Display for LinkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level={} interest={} type={}",
            self.level, self.interest, self.resource_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: &str, interest: &str, resource_type: &str) -> LinkRecord {
        LinkRecord::new(
            "http://example.com",
            "Example",
            LinkOptions::new(level, interest, resource_type),
        )
    }

    #[test]
    fn test_field_order_in_json() {
        let json = serde_json::to_string(&record("some", "web", "article")).unwrap();
        let link_pos = json.find("\"link\"").unwrap();
        let title_pos = json.find("\"title\"").unwrap();
        let options_pos = json.find("\"options\"").unwrap();
        assert!(link_pos < title_pos && title_pos < options_pos);

        // The reserved-word field serializes as "type"
        assert!(json.contains("\"type\":\"article\""));
        assert!(!json.contains("resource_type"));
    }

    #[test]
    fn test_cmp_by_options_orders_interest_first() {
        let android = record("some", "android", "video");
        let web = record("none", "web", "article");
        assert_eq!(android.cmp_by_options(&web), Ordering::Less);
        assert_eq!(web.cmp_by_options(&android), Ordering::Greater);
    }

    #[test]
    fn test_cmp_by_options_breaks_ties_on_level_then_type() {
        let a = record("lots", "web", "article");
        let b = record("none", "web", "article");
        assert_eq!(a.cmp_by_options(&b), Ordering::Greater);

        let c = record("none", "web", "article");
        let d = record("none", "web", "video");
        assert_eq!(c.cmp_by_options(&d), Ordering::Less);
        assert_eq!(c.cmp_by_options(&c.clone()), Ordering::Equal);
    }
}
