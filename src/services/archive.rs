//! Archive rollups
//!
//! Pure functions that fold a post snapshot into the sidebar widgets: a tag
//! cloud with per-tag counts and a month-by-month posting history. Both only
//! see published posts, so hidden drafts never leak through the counts.

use crate::models::Post;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A tag with the number of published posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}

/// A calendar month with the number of posts published in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// Count tag usage across published posts.
///
/// Tags are compared exactly as written. The result is sorted by name,
/// case-insensitively, with byte order breaking ties.
pub fn tag_cloud(posts: &[Post]) -> Vec<TagCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();

    for post in posts.iter().filter(|p| p.active) {
        for tag in post.tag_list() {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }

    let mut cloud: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect();

    cloud.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    cloud
}

/// Group published posts by calendar month, newest month first.
pub fn history(posts: &[Post]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<(i32, u32), i64> = BTreeMap::new();

    for post in posts.iter().filter(|p| p.active) {
        *counts
            .entry((post.date.year(), post.date.month()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .rev()
        .map(|((year, month), count)| MonthCount { year, month, count })
        .collect()
}
