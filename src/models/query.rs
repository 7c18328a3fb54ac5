//! Query criteria and pagination types for post listings
//!
//! This module provides:
//! - `PostQuery`, the explicit criteria struct every list path passes around
//! - `SortKey` for the supported sort orders
//! - `DateFilter`, the parsed form of the DDMMYYYY date criterion
//! - `Pagination` / `PostPage`, the paged result envelope

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::post::Post;

/// Sort order for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Title A-Z
    TitleAsc,
    /// Title Z-A
    TitleDesc,
    /// Oldest first
    DateAsc,
    /// Newest first
    DateDesc,
    /// Default order: newest first
    #[default]
    Recent,
}

impl SortKey {
    /// Parse a sort key from its query-string form.
    ///
    /// Unknown or empty strings map to `None`, which callers fold into the
    /// default order the way the original list screens did.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "title-asc" => Some(SortKey::TitleAsc),
            "title-desc" => Some(SortKey::TitleDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "date-desc" => Some(SortKey::DateDesc),
            _ => None,
        }
    }

    /// Query-string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::Recent => "recent",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parsed form of the raw date criterion.
///
/// The raw input is only treated as a date when it is exactly eight digits,
/// read as DDMMYYYY. Eight digits that do not name a real calendar day are
/// `Invalid`, which the query pipeline turns into an empty result rather than
/// silently dropping the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// No date criterion supplied (or input not an 8-digit string)
    Unfiltered,
    /// Keep posts published on or after this day
    From(chrono::DateTime<Utc>),
    /// Eight digits that are not a valid calendar date
    Invalid,
}

impl DateFilter {
    /// Parse an optional raw filter string
    pub fn parse(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return DateFilter::Unfiltered;
        };
        let raw = raw.trim();
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return DateFilter::Unfiltered;
        }

        // Eight digits: committed to being a date now, DDMMYYYY order
        let day: u32 = raw[0..2].parse().unwrap_or(0);
        let month: u32 = raw[2..4].parse().unwrap_or(0);
        let year: i32 = raw[4..8].parse().unwrap_or(0);

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => {
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is always a valid time")
                    .and_utc();
                DateFilter::From(midnight)
            }
            None => DateFilter::Invalid,
        }
    }
}

/// Criteria for a post listing.
///
/// Every list path (public page, admin screen, tests) builds one of these and
/// hands it to the query pipeline; there is no second filtering code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostQuery {
    /// Case-insensitive substring over title or content
    pub text: Option<String>,
    /// Case-insensitive substring over the raw tags string
    pub tag: Option<String>,
    /// Exact case-insensitive category match
    pub category: Option<String>,
    /// Exact slug match
    pub url_id: Option<String>,
    /// Raw DDMMYYYY date criterion
    pub date: Option<String>,
    /// Sort order
    pub sort: SortKey,
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of posts per page
    pub limit: u32,
    /// Whether hidden posts are visible to this caller
    pub include_inactive: bool,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            text: None,
            tag: None,
            category: None,
            url_id: None,
            date: None,
            sort: SortKey::default(),
            page: 1,
            limit: 10,
            include_inactive: false,
        }
    }
}

impl PostQuery {
    /// Criteria for the public site: active posts only
    pub fn public() -> Self {
        Self::default()
    }

    /// Criteria for the admin screen: hidden posts included
    pub fn admin() -> Self {
        Self {
            include_inactive: true,
            ..Self::default()
        }
    }

    /// Set the text criterion
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the tag criterion
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the category criterion
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the raw date criterion
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page, clamped to >= 1
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size, clamped to >= 1
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}

/// Page metadata attached to every listing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Total number of pages for the filtered set
    pub total_pages: u32,
    /// Total number of posts matching the criteria
    pub total_posts: u64,
    /// Whether a later page exists
    pub has_next_page: bool,
    /// Whether an earlier page exists
    pub has_previous_page: bool,
}

impl Pagination {
    /// Compute page metadata from a match count
    pub fn new(current_page: u32, limit: u32, total_posts: u64) -> Self {
        let limit = limit.max(1) as u64;
        let total_pages = total_posts.div_ceil(limit) as u32;
        Self {
            current_page,
            total_pages,
            total_posts,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

/// One page of posts plus its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    /// Posts in the current page
    pub posts: Vec<Post>,
    /// Page metadata
    pub pagination: Pagination,
}

impl PostPage {
    /// An empty page, used when a query matches nothing or fails benignly
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            posts: Vec::new(),
            pagination: Pagination::new(page, limit, 0),
        }
    }

    /// Check if the page has no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Number of posts in the current page
    pub fn len(&self) -> usize {
        self.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!(SortKey::from_str("title-asc"), Some(SortKey::TitleAsc));
        assert_eq!(SortKey::from_str("title-desc"), Some(SortKey::TitleDesc));
        assert_eq!(SortKey::from_str("date-asc"), Some(SortKey::DateAsc));
        assert_eq!(SortKey::from_str("date-desc"), Some(SortKey::DateDesc));
        assert_eq!(SortKey::from_str(""), None);
        assert_eq!(SortKey::from_str("likes-desc"), None);
    }

    #[test]
    fn test_date_filter_valid_date() {
        let parsed = DateFilter::parse(Some("01012022"));
        match parsed {
            DateFilter::From(dt) => {
                assert_eq!(dt.to_rfc3339(), "2022-01-01T00:00:00+00:00");
            }
            other => panic!("expected From, got {:?}", other),
        }
    }

    #[test]
    fn test_date_filter_invalid_calendar_date() {
        // Eight digits but month 99 does not exist
        assert_eq!(DateFilter::parse(Some("01992022")), DateFilter::Invalid);
        // Feb 30 never happens
        assert_eq!(DateFilter::parse(Some("30022021")), DateFilter::Invalid);
    }

    #[test]
    fn test_date_filter_leap_day() {
        assert!(matches!(
            DateFilter::parse(Some("29022024")),
            DateFilter::From(_)
        ));
        assert_eq!(DateFilter::parse(Some("29022023")), DateFilter::Invalid);
    }

    #[test]
    fn test_date_filter_ignores_partial_input() {
        // Not yet eight digits: the filter is simply not applied
        assert_eq!(DateFilter::parse(Some("0101202")), DateFilter::Unfiltered);
        assert_eq!(DateFilter::parse(Some("")), DateFilter::Unfiltered);
        assert_eq!(DateFilter::parse(Some("01-01-22")), DateFilter::Unfiltered);
        assert_eq!(DateFilter::parse(None), DateFilter::Unfiltered);
    }

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(1, 10, 35);
        assert_eq!(p.total_pages, 4);
        assert!(p.has_next_page);
        assert!(!p.has_previous_page);

        let p = Pagination::new(4, 10, 35);
        assert!(!p.has_next_page);
        assert!(p.has_previous_page);

        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_previous_page);

        let p = Pagination::new(1, 10, 10);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next_page);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let p = Pagination::new(2, 10, 35);
        let json = serde_json::to_value(&p).expect("serialize");
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 4);
        assert_eq!(json["totalPosts"], 35);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPreviousPage"], true);
    }

    #[test]
    fn test_query_builder_clamps() {
        let q = PostQuery::public().with_page(0).with_limit(0);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
        assert!(!q.include_inactive);
        assert!(PostQuery::admin().include_inactive);
    }
}
