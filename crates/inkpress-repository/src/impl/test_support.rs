//! In-memory DAOs and broken caches for repository unit tests.

use crate::cache::CacheInterface;
use crate::dao::{ArticleDao, ArticleFilter, AuthorDao};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use inkpress_core::{
    Article, ArticleId, ArticlePage, Author, AuthorId, InkpressError, InkpressResult, NewArticle, PageRequest,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared rows so the article DAO can join author names.
#[derive(Default)]
pub struct Store {
    pub authors: Mutex<HashMap<AuthorId, Author>>,
    pub articles: Mutex<Vec<Article>>,
}

impl Store {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_author(&self, name: &str) -> Author {
        let author = Author {
            id: AuthorId::new(),
            name: name.to_string(),
        };
        self.authors.lock().insert(author.id, author.clone());
        author
    }

    /// Adds an article created `age_secs` seconds ago.
    pub fn add_article(&self, author: &Author, title: &str, age_secs: i64) -> Article {
        let article = Article {
            id: ArticleId::new(),
            author_id: author.id,
            author: author.name.clone(),
            title: title.to_string(),
            body: format!("{title} body"),
            created_at: Utc::now() - ChronoDuration::seconds(age_secs),
        };
        self.articles.lock().push(article.clone());
        article
    }

    pub fn remove_article(&self, id: ArticleId) {
        self.articles.lock().retain(|a| a.id != id);
    }
}

/// Counts every call that would be a database round-trip.
#[derive(Default)]
pub struct Calls {
    pub find_by_id: AtomicUsize,
    pub find_page: AtomicUsize,
    pub insert: AtomicUsize,
}

impl Calls {
    pub fn page_queries(&self) -> usize {
        self.find_page.load(Ordering::SeqCst)
    }

    pub fn detail_queries(&self) -> usize {
        self.find_by_id.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.page_queries() + self.detail_queries() + self.insert.load(Ordering::SeqCst)
    }
}

pub struct FakeArticleDao {
    store: Arc<Store>,
    pub calls: Calls,
}

impl FakeArticleDao {
    pub fn new(store: Arc<Store>) -> Arc<Self> {
        Arc::new(Self {
            store,
            calls: Calls::default(),
        })
    }
}

#[async_trait]
impl ArticleDao for FakeArticleDao {
    async fn find_by_id(&self, id: ArticleId) -> InkpressResult<Option<Article>> {
        self.calls.find_by_id.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.articles.lock().iter().find(|a| a.id == id).cloned())
    }

    async fn find_page(&self, filter: &ArticleFilter, page: PageRequest) -> InkpressResult<ArticlePage> {
        self.calls.find_page.fetch_add(1, Ordering::SeqCst);
        let mut matching: Vec<Article> = self
            .store
            .articles
            .lock()
            .iter()
            .filter(|a| {
                filter.text.as_ref().map_or(true, |t| {
                    let t = t.to_lowercase();
                    a.title.to_lowercase().contains(&t) || a.body.to_lowercase().contains(&t)
                })
            })
            .filter(|a| filter.author_ids.as_ref().map_or(true, |ids| ids.contains(&a.author_id)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap();
        let limit = usize::try_from(page.limit()).unwrap();
        let articles = matching.into_iter().skip(offset).take(limit).collect();
        Ok(ArticlePage::new(articles, total))
    }

    async fn insert(&self, id: ArticleId, article: &NewArticle) -> InkpressResult<Article> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        let author = self
            .store
            .authors
            .lock()
            .get(&article.author_id)
            .cloned()
            .ok_or_else(|| InkpressError::validation("Referenced record does not exist"))?;
        let stored = Article {
            id,
            author_id: author.id,
            author: author.name,
            title: article.title.clone(),
            body: article.body.clone(),
            created_at: Utc::now(),
        };
        self.store.articles.lock().push(stored.clone());
        Ok(stored)
    }
}

pub struct FakeAuthorDao {
    store: Arc<Store>,
    pub lookups: AtomicUsize,
    pub name_searches: AtomicUsize,
}

impl FakeAuthorDao {
    pub fn new(store: Arc<Store>) -> Arc<Self> {
        Arc::new(Self {
            store,
            lookups: AtomicUsize::new(0),
            name_searches: AtomicUsize::new(0),
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorDao for FakeAuthorDao {
    async fn find_by_id(&self, id: AuthorId) -> InkpressResult<Option<Author>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.authors.lock().get(&id).cloned())
    }

    async fn find_ids_by_name(&self, name: &str) -> InkpressResult<Vec<AuthorId>> {
        self.name_searches.fetch_add(1, Ordering::SeqCst);
        let name = name.to_lowercase();
        Ok(self
            .store
            .authors
            .lock()
            .values()
            .filter(|a| a.name.to_lowercase().contains(&name))
            .map(|a| a.id)
            .collect())
    }

    async fn insert(&self, author: &Author) -> InkpressResult<Author> {
        self.store.authors.lock().insert(author.id, author.clone());
        Ok(author.clone())
    }
}

/// A cache whose every operation fails.
#[derive(Default)]
pub struct FailingCache {
    pub attempts: AtomicUsize,
}

impl FailingCache {
    fn fail<T>(&self) -> InkpressResult<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(InkpressError::cache("connection refused"))
    }
}

#[async_trait]
impl CacheInterface for FailingCache {
    async fn get_raw(&self, _key: &str) -> InkpressResult<Option<String>> {
        self.fail()
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> InkpressResult<()> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> InkpressResult<bool> {
        self.fail()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Cache whose every call stalls forever, like a Redis server that accepted
/// the connection and stopped answering.
#[derive(Default)]
pub struct HangingCache {
    pub attempts: AtomicUsize,
}

impl HangingCache {
    async fn stall<T>(&self) -> InkpressResult<T> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[async_trait]
impl CacheInterface for HangingCache {
    async fn get_raw(&self, _key: &str) -> InkpressResult<Option<String>> {
        self.stall().await
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> InkpressResult<()> {
        self.stall().await
    }

    async fn delete(&self, _key: &str) -> InkpressResult<bool> {
        self.stall().await
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Settings with a short operation timeout for stalled-cache tests.
pub fn impatient_settings() -> crate::cache::CacheSettings {
    crate::cache::CacheSettings {
        operation_timeout: Duration::from_millis(20),
        ..crate::cache::CacheSettings::default()
    }
}
