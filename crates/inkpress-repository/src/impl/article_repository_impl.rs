//! `ArticleRepositoryImpl`: article reads and writes behind a read-through cache.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn ArticleRepository>
//! ArticleRepositoryImpl       ← cache policy, coordinates DAOs
//!   ↓ Arc<dyn ArticleDao>, Arc<dyn AuthorDao>, Arc<dyn CacheInterface>
//! PgArticleDaoImpl / PgAuthorDaoImpl / Redis
//! ```
//!
//! Only unfiltered listings are cached. A cached page is stored as a list
//! of article IDs under `article:<page>:<limit>`, with each article under
//! `article:detail:<id>` and the count under `article:total`. Creating an
//! article drops the count and a fixed grid of page keys.

use crate::cache::{self, cache_keys, CacheInterface, CacheSettings};
use crate::dao::{ArticleDao, ArticleFilter, AuthorDao};
use crate::traits::ArticleRepository;
use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use inkpress_core::{Article, ArticleId, ArticlePage, ArticleQuery, InkpressResult, NewArticle, PageRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Repository implementation that applies the article cache policy.
pub struct ArticleRepositoryImpl {
    article_dao: Arc<dyn ArticleDao>,
    author_dao: Arc<dyn AuthorDao>,
    cache: Arc<dyn CacheInterface>,
    settings: CacheSettings,
}

impl ArticleRepositoryImpl {
    /// Creates a new `ArticleRepositoryImpl`.
    #[must_use]
    pub fn new(
        article_dao: Arc<dyn ArticleDao>,
        author_dao: Arc<dyn AuthorDao>,
        cache: Arc<dyn CacheInterface>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            article_dao,
            author_dao,
            cache,
            settings,
        }
    }

    /// Serves a page entirely from cache, or `None` if any part is missing.
    async fn cached_page(&self, page: PageRequest) -> Option<ArticlePage> {
        let limit = self.settings.operation_timeout;
        let ids: Vec<ArticleId> = cache::read(&*self.cache, &cache_keys::article_page(page), limit).await?;
        let total: u64 = cache::read(&*self.cache, cache_keys::ARTICLE_TOTAL, limit).await?;

        let articles = self.resolve(ids).await;
        debug!(page = page.page, limit = page.limit, hits = articles.len(), "Article page served from cache");
        Some(ArticlePage::new(articles, total))
    }

    /// Resolves IDs to articles in order, at most `lookup_concurrency` at a time.
    ///
    /// IDs that no longer exist or fail to load are left out of the page.
    async fn resolve(&self, ids: Vec<ArticleId>) -> Vec<Article> {
        stream::iter(ids)
            .map(|id| async move {
                match self.find_by_id(id).await {
                    Ok(found) => found,
                    Err(e) => {
                        warn!(article_id = %id, error = %e, "Dropping article from cached page");
                        None
                    }
                }
            })
            .buffered(self.settings.lookup_concurrency.max(1))
            .filter_map(future::ready)
            .collect()
            .await
    }

    async fn query_store(&self, query: &ArticleQuery, page: PageRequest) -> InkpressResult<ArticlePage> {
        let author_ids = match query.author_name() {
            Some(name) => {
                let ids = self.author_dao.find_ids_by_name(name).await?;
                if ids.is_empty() {
                    debug!("No authors match '{}', returning empty page", name);
                    return Ok(ArticlePage::empty());
                }
                Some(ids)
            }
            None => None,
        };

        let filter = ArticleFilter {
            text: query.text().map(str::to_owned),
            author_ids,
        };
        self.article_dao.find_page(&filter, page).await
    }

    async fn populate(&self, page: PageRequest, result: &ArticlePage) {
        let CacheSettings {
            ttl,
            operation_timeout: limit,
            ..
        } = self.settings;

        future::join_all(result.articles.iter().map(|article| {
            let key = cache_keys::article_detail(article.id);
            async move { cache::write(&*self.cache, &key, article, ttl, limit).await }
        }))
        .await;

        let ids: Vec<ArticleId> = result.articles.iter().map(|a| a.id).collect();
        cache::write(&*self.cache, &cache_keys::article_page(page), &ids, ttl, limit).await;
        cache::write(&*self.cache, cache_keys::ARTICLE_TOTAL, &result.total, ttl, limit).await;
    }

    async fn invalidate_listings(&self) {
        let keys = cache_keys::article_listing_keys();
        future::join_all(keys.iter().map(|key| cache::evict(&*self.cache, key, self.settings.operation_timeout))).await;
        debug!("Invalidated {} article listing keys", keys.len());
    }
}

#[async_trait]
impl ArticleRepository for ArticleRepositoryImpl {
    async fn find_all(&self, query: &ArticleQuery) -> InkpressResult<ArticlePage> {
        let page = query.page_request();
        let cacheable = query.is_cacheable();
        debug!(page = page.page, limit = page.limit, cacheable, "Repository: find_all");

        if cacheable {
            if let Some(cached) = self.cached_page(page).await {
                return Ok(cached);
            }
        }

        let result = self.query_store(query, page).await?;

        if cacheable {
            self.populate(page, &result).await;
        }

        Ok(result)
    }

    async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>> {
        let key = cache_keys::article_detail(id);
        let limit = self.settings.operation_timeout;
        if let Some(article) = cache::read::<Article>(&*self.cache, &key, limit).await {
            return Ok(Some(article));
        }

        let found = self.article_dao.find_by_id(id).await?;
        match &found {
            Some(article) => cache::write(&*self.cache, &key, article, self.settings.ttl, limit).await,
            None => debug!("Article {} not found", id),
        }
        Ok(found)
    }

    async fn create(&self, article: NewArticle) -> InkpressResult<Article> {
        let created = self.article_dao.insert(ArticleId::new(), &article).await?;
        info!(article_id = %created.id, author_id = %created.author_id, "Article created");

        self.invalidate_listings().await;
        Ok(created)
    }
}

impl std::fmt::Debug for ArticleRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleRepositoryImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::r#impl::test_support::{
        impatient_settings, FailingCache, FakeArticleDao, FakeAuthorDao, HangingCache, Store,
    };
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    struct Fixture {
        store: Arc<Store>,
        articles: Arc<FakeArticleDao>,
        authors: Arc<FakeAuthorDao>,
        cache: Arc<InMemoryCache>,
        repo: ArticleRepositoryImpl,
    }

    fn fixture() -> Fixture {
        let store = Store::new();
        let articles = FakeArticleDao::new(Arc::clone(&store));
        let authors = FakeAuthorDao::new(Arc::clone(&store));
        let cache = Arc::new(InMemoryCache::new());
        let repo = ArticleRepositoryImpl::new(
            articles.clone(),
            authors.clone(),
            cache.clone(),
            CacheSettings::default(),
        );
        Fixture {
            store,
            articles,
            authors,
            cache,
            repo,
        }
    }

    fn titles(page: &ArticlePage) -> Vec<&str> {
        page.articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_second_unfiltered_listing_skips_database() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "Older", 60);
        f.store.add_article(&jane, "Newer", 10);

        let first = f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        let calls_after_first = f.articles.calls.total();

        let second = f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(titles(&second), vec!["Newer", "Older"]);
        assert_eq!(second.total, 2);
        assert_eq!(f.articles.calls.total(), calls_after_first);
    }

    #[tokio::test]
    async fn test_listing_populates_page_total_and_detail_keys() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        let article = f.store.add_article(&jane, "Cached", 0);

        f.repo.find_all(&ArticleQuery::page(0, 0)).await.unwrap();

        assert!(f.cache.contains_key("article:1:10"));
        assert!(f.cache.contains_key(cache_keys::ARTICLE_TOTAL));
        assert!(f.cache.contains_key(&cache_keys::article_detail(article.id)));
    }

    #[tokio::test]
    async fn test_create_invalidates_total_and_page_grid() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "First", 30);

        let before = f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        assert_eq!(before.total, 1);
        assert!(f.cache.contains_key("article:1:10"));

        f.repo
            .create(NewArticle::new(jane.id, "Second", "Body"))
            .await
            .unwrap();

        assert!(!f.cache.contains_key(cache_keys::ARTICLE_TOTAL));
        assert!(!f.cache.contains_key("article:1:10"));

        let after = f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        assert_eq!(after.total, 2);
        assert_eq!(titles(&after), vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_page_size_outside_grid_survives_create() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "First", 30);

        f.repo.find_all(&ArticleQuery::page(1, 7)).await.unwrap();
        f.repo
            .create(NewArticle::new(jane.id, "Second", "Body"))
            .await
            .unwrap();

        assert!(f.cache.contains_key("article:1:7"));
        assert!(!f.cache.contains_key(cache_keys::ARTICLE_TOTAL));

        // The ID list is stale but the total is rebuilt from the database.
        let page = f.repo.find_all(&ArticleQuery::page(1, 7)).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_filtered_listing_never_touches_page_cache() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "Rust tips", 10);
        f.store.add_article(&jane, "Cooking", 20);

        let by_text = f
            .repo
            .find_all(&ArticleQuery::page(1, 10).with_query("rust"))
            .await
            .unwrap();
        let by_author = f
            .repo
            .find_all(&ArticleQuery::page(1, 10).with_author("jane"))
            .await
            .unwrap();

        assert_eq!(titles(&by_text), vec!["Rust tips"]);
        assert_eq!(by_text.total, 1);
        assert_eq!(by_author.total, 2);
        assert!(f.cache.is_empty());
        assert_eq!(f.articles.calls.page_queries(), 2);
    }

    #[tokio::test]
    async fn test_filtered_listing_ignores_prefilled_page_cache() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "Rust tips", 10);
        f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();

        f.repo
            .find_all(&ArticleQuery::page(1, 10).with_query("rust"))
            .await
            .unwrap();

        assert_eq!(f.articles.calls.page_queries(), 2);
    }

    #[tokio::test]
    async fn test_unknown_author_short_circuits() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        f.store.add_article(&jane, "Hello", 0);

        let page = f
            .repo
            .find_all(&ArticleQuery::page(1, 10).with_author("nobody"))
            .await
            .unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(f.authors.name_searches.load(Ordering::SeqCst), 1);
        assert_eq!(f.articles.calls.page_queries(), 0);
    }

    #[tokio::test]
    async fn test_failing_cache_still_returns_database_data() {
        let store = Store::new();
        let jane = store.add_author("Jane Doe");
        let article = store.add_article(&jane, "Resilient", 0);
        let articles = FakeArticleDao::new(Arc::clone(&store));
        let cache = Arc::new(FailingCache::default());
        let repo = ArticleRepositoryImpl::new(
            articles.clone(),
            FakeAuthorDao::new(Arc::clone(&store)),
            cache.clone(),
            CacheSettings::default(),
        );

        let first = repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        let second = repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        assert_eq!(titles(&first), vec!["Resilient"]);
        assert_eq!(first, second);
        assert_eq!(articles.calls.page_queries(), 2);

        let found = repo.find_by_id(article.id).await.unwrap();
        assert_eq!(found.map(|a| a.title), Some("Resilient".to_string()));

        repo.create(NewArticle::new(jane.id, "Another", "Body"))
            .await
            .unwrap();
        assert!(cache.attempts.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_stalled_cache_times_out_and_serves_database_data() {
        let store = Store::new();
        let jane = store.add_author("Jane Doe");
        let article = store.add_article(&jane, "Patient", 0);
        let articles = FakeArticleDao::new(Arc::clone(&store));
        let cache = Arc::new(HangingCache::default());
        let repo = ArticleRepositoryImpl::new(
            articles.clone(),
            FakeAuthorDao::new(Arc::clone(&store)),
            cache.clone(),
            impatient_settings(),
        );
        let deadline = Duration::from_secs(5);

        let page = tokio::time::timeout(deadline, repo.find_all(&ArticleQuery::page(1, 10)))
            .await
            .expect("listing must not wait on a stalled cache")
            .unwrap();
        assert_eq!(titles(&page), vec!["Patient"]);
        assert_eq!(articles.calls.page_queries(), 1);

        let found = tokio::time::timeout(deadline, repo.find_by_id(article.id))
            .await
            .expect("lookup must not wait on a stalled cache")
            .unwrap();
        assert_eq!(found.map(|a| a.title), Some("Patient".to_string()));

        let created = tokio::time::timeout(deadline, repo.create(NewArticle::new(jane.id, "Another", "Body")))
            .await
            .expect("create must not wait on a stalled cache")
            .unwrap();
        assert_eq!(created.title, "Another");
        assert!(cache.attempts.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_vanished_article_is_omitted_from_cached_page() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        let kept = f.store.add_article(&jane, "Kept", 20);
        let gone = f.store.add_article(&jane, "Gone", 10);

        f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();

        f.store.remove_article(gone.id);
        f.cache.delete(&cache_keys::article_detail(gone.id)).await.unwrap();

        let page = f.repo.find_all(&ArticleQuery::page(1, 10)).await.unwrap();
        assert_eq!(page.articles, vec![kept]);
        assert_eq!(f.articles.calls.page_queries(), 1);
    }

    #[tokio::test]
    async fn test_cached_page_keeps_order_with_small_concurrency() {
        let store = Store::new();
        let jane = store.add_author("Jane Doe");
        for (i, title) in ["e", "d", "c", "b", "a"].iter().enumerate() {
            store.add_article(&jane, title, i64::try_from(i).unwrap() * 10);
        }
        let cache = Arc::new(InMemoryCache::new());
        let repo = ArticleRepositoryImpl::new(
            FakeArticleDao::new(Arc::clone(&store)),
            FakeAuthorDao::new(Arc::clone(&store)),
            cache.clone(),
            CacheSettings {
                lookup_concurrency: 2,
                ..CacheSettings::default()
            },
        );

        repo.find_all(&ArticleQuery::page(1, 5)).await.unwrap();
        let ids: Vec<ArticleId> = store.articles.lock().iter().map(|a| a.id).collect();
        for id in ids {
            cache.delete(&cache_keys::article_detail(id)).await.unwrap();
        }

        let page = repo.find_all(&ArticleQuery::page(1, 5)).await.unwrap();
        assert_eq!(titles(&page), vec!["e", "d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_find_by_id_reads_through() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        let article = f.store.add_article(&jane, "Detail", 0);

        assert_eq!(f.repo.find_by_id(article.id).await.unwrap(), Some(article.clone()));
        assert_eq!(f.repo.find_by_id(article.id).await.unwrap(), Some(article));
        assert_eq!(f.articles.calls.detail_queries(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none_and_not_cached() {
        let f = fixture();
        let id = ArticleId::new();

        assert_eq!(f.repo.find_by_id(id).await.unwrap(), None);
        assert!(!f.cache.contains_key(&cache_keys::article_detail(id)));
    }

    #[tokio::test]
    async fn test_second_page_offsets_results() {
        let f = fixture();
        let jane = f.store.add_author("Jane Doe");
        for i in 0..3 {
            f.store.add_article(&jane, &format!("Article {i}"), i * 10);
        }

        let page = f.repo.find_all(&ArticleQuery::page(2, 2)).await.unwrap();
        assert_eq!(titles(&page), vec!["Article 2"]);
        assert_eq!(page.total, 3);
        assert!(f.cache.contains_key("article:2:2"));
    }
}
