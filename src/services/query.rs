//! Post query pipeline
//!
//! One pure function turns a post snapshot plus a `PostQuery` into a page of
//! results. Every listing surface (public site, admin screen) goes through
//! `run`; there is no second filtering or sorting code path.

use crate::models::{DateFilter, Pagination, Post, PostPage, PostQuery, SortKey};

/// Filter, sort and paginate a snapshot of posts.
///
/// The snapshot is consumed so the matching posts can be returned without
/// cloning. Results are deterministic: sorts are stable, ties keep the
/// snapshot's relative order.
pub fn run(posts: Vec<Post>, query: &PostQuery) -> PostPage {
    let date_filter = DateFilter::parse(query.date.as_deref());
    if date_filter == DateFilter::Invalid {
        // Eight digits that name no real day match nothing at all
        return PostPage::empty(query.page, query.limit);
    }

    let mut matched: Vec<Post> = posts
        .into_iter()
        .filter(|post| matches(post, query, date_filter))
        .collect();

    sort(&mut matched, query.sort);
    paginate(matched, query.page, query.limit)
}

/// Whether a single post satisfies every criterion in the query
fn matches(post: &Post, query: &PostQuery, date_filter: DateFilter) -> bool {
    if !query.include_inactive && !post.active {
        return false;
    }

    if let Some(text) = criterion(&query.text) {
        let needle = text.to_lowercase();
        if !post.title.to_lowercase().contains(&needle)
            && !post.content.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if let Some(tag) = criterion(&query.tag) {
        // Substring over the raw comma-joined string, not a tag-set match
        if !post.tags.to_lowercase().contains(&tag.to_lowercase()) {
            return false;
        }
    }

    if let Some(category) = criterion(&query.category) {
        if post.category.to_lowercase() != category.to_lowercase() {
            return false;
        }
    }

    if let Some(url_id) = criterion(&query.url_id) {
        if post.url_id != url_id {
            return false;
        }
    }

    if let DateFilter::From(from) = date_filter {
        if post.date < from {
            return false;
        }
    }

    true
}

/// Empty strings behave as absent criteria, matching untouched form inputs
fn criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn sort(posts: &mut [Post], key: SortKey) {
    match key {
        SortKey::TitleAsc => {
            posts.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
        SortKey::TitleDesc => {
            posts.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()));
        }
        SortKey::DateAsc => posts.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::DateDesc | SortKey::Recent => posts.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

fn paginate(posts: Vec<Post>, page: u32, limit: u32) -> PostPage {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = posts.len() as u64;

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let posts: Vec<Post> = posts.into_iter().skip(start).take(limit as usize).collect();

    PostPage {
        posts,
        pagination: Pagination::new(page, limit, total),
    }
}
