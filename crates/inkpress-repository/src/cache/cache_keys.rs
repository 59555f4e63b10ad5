//! Cache key namespaces.
//!
//! These strings are shared with any entries already stored in the
//! backend, so their shape must not change.

use inkpress_core::{ArticleId, AuthorId, PageRequest};

/// Namespace for article entries.
pub const ARTICLE_NAMESPACE: &str = "article";

/// Namespace for author entries.
pub const AUTHOR_NAMESPACE: &str = "author";

/// Total number of articles, valid only for unfiltered listings.
pub const ARTICLE_TOTAL: &str = "article:total";

/// Pages swept on article creation.
pub const INVALIDATION_PAGES: std::ops::RangeInclusive<u32> = 1..=10;

/// Page sizes swept on article creation.
pub const INVALIDATION_LIMITS: [u32; 6] = [5, 10, 20, 25, 50, 100];

/// Identifier list for one page of the unfiltered listing.
#[must_use]
pub fn article_page(page: PageRequest) -> String {
    format!("{}:{}:{}", ARTICLE_NAMESPACE, page.page, page.limit)
}

/// A single serialized article.
#[must_use]
pub fn article_detail(id: ArticleId) -> String {
    format!("{}:detail:{}", ARTICLE_NAMESPACE, id)
}

/// A single serialized author.
#[must_use]
pub fn author(id: AuthorId) -> String {
    format!("{}:{}", AUTHOR_NAMESPACE, id)
}

/// Every key a new article can make stale: the total plus the page grid.
///
/// Page sizes outside the grid are not swept and age out through their TTL.
#[must_use]
pub fn article_listing_keys() -> Vec<String> {
    let mut keys = Vec::with_capacity(1 + INVALIDATION_PAGES.count() * INVALIDATION_LIMITS.len());
    keys.push(ARTICLE_TOTAL.to_string());
    for page in INVALIDATION_PAGES {
        for limit in INVALIDATION_LIMITS {
            keys.push(article_page(PageRequest { page, limit }));
        }
    }
    keys
}
