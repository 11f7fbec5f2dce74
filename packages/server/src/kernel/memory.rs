//! In-memory stores used when no database is configured, and by tests

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::common::{AdminId, PostId};
use crate::domains::auth::AdminAccount;
use crate::domains::posts::{BlogPost, PostError, PostFilter, PostInput};
use crate::kernel::{BaseAccountStore, BaseNewsletterStore, BasePostStore};

// =============================================================================
// Posts
// =============================================================================

#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_in_use(posts: &[BlogPost], slug: &str, except: Option<PostId>) -> bool {
        posts
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }
}

#[async_trait]
impl BasePostStore for InMemoryPostStore {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<BlogPost>, PostError> {
        let posts = self.posts.read().await;
        let mut matching: Vec<BlogPost> =
            posts.iter().filter(|p| filter.matches(p)).cloned().collect();

        matching.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        if let Some(limit) = filter.limit {
            matching.truncate(limit.max(0) as usize);
        }
        Ok(matching)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<BlogPost>, PostError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, PostError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, input: PostInput) -> Result<BlogPost, PostError> {
        let mut posts = self.posts.write().await;
        if Self::slug_in_use(&posts, &input.slug, None) {
            return Err(PostError::SlugTaken(input.slug));
        }

        let post = BlogPost::from_input(PostId::new(), input, Utc::now());
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, input: PostInput) -> Result<BlogPost, PostError> {
        let mut posts = self.posts.write().await;
        if Self::slug_in_use(&posts, &input.slug, Some(id)) {
            return Err(PostError::SlugTaken(input.slug));
        }

        let existing = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PostError::NotFound)?;

        let mut updated = BlogPost::from_input(id, input, Utc::now());
        updated.created_at = existing.created_at;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(PostError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Admin accounts
// =============================================================================

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, AdminAccount>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseAccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.id == id).cloned())
    }

    async fn upsert(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<AdminAccount> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(email.to_string())
            .and_modify(|a| {
                a.display_name = display_name.to_string();
                a.password_hash = password_hash.to_string();
            })
            .or_insert_with(|| AdminAccount {
                id: AdminId::new(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                display_name: display_name.to_string(),
                created_at: Utc::now(),
            });
        Ok(account.clone())
    }
}

// =============================================================================
// Newsletter
// =============================================================================

#[derive(Default)]
pub struct InMemoryNewsletterStore {
    emails: RwLock<HashSet<String>>,
}

impl InMemoryNewsletterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.emails.read().await.len()
    }
}

#[async_trait]
impl BaseNewsletterStore for InMemoryNewsletterStore {
    async fn subscribe(&self, email: &str) -> Result<bool> {
        Ok(self.emails.write().await.insert(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::posts::Category;
    use chrono::NaiveDate;

    fn input(title: &str, slug: &str, day: u32, category: Category) -> PostInput {
        PostInput {
            title: title.to_string(),
            slug: slug.to_string(),
            excerpt: "Excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            image_url: None,
            author_name: "Dr. Sarah Johnson".to_string(),
            author_role: "Clinical Psychologist".to_string(),
            author_avatar: None,
            publish_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            read_time: "1 min read".to_string(),
            category,
            featured: false,
        }
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filter_and_limit() {
        let store = InMemoryPostStore::new();
        store.create(input("Old", "old", 1, Category::Anxiety)).await.unwrap();
        store.create(input("New", "new", 20, Category::Anxiety)).await.unwrap();
        store.create(input("Mid", "mid", 10, Category::Wellness)).await.unwrap();

        let all = store.list(&PostFilter::default()).await.unwrap();
        let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);

        let anxiety = store
            .list(&PostFilter {
                category: Some(Category::Anxiety),
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(anxiety.len(), 1);
        assert_eq!(anxiety[0].slug, "new");
    }

    #[tokio::test]
    async fn test_update_keeps_own_slug_but_rejects_others() {
        let store = InMemoryPostStore::new();
        let a = store.create(input("A", "a", 1, Category::Therapy)).await.unwrap();
        store.create(input("B", "b", 2, Category::Therapy)).await.unwrap();

        let same = store.update(a.id, input("A2", "a", 1, Category::Therapy)).await.unwrap();
        assert_eq!(same.title, "A2");
        assert_eq!(same.created_at, a.created_at);

        let clash = store.update(a.id, input("A3", "b", 1, Category::Therapy)).await;
        assert!(matches!(clash, Err(PostError::SlugTaken(ref s)) if s == "b"));
    }

    #[tokio::test]
    async fn test_missing_posts() {
        let store = InMemoryPostStore::new();
        let id = PostId::new();
        assert!(matches!(
            store.update(id, input("X", "x", 1, Category::Therapy)).await,
            Err(PostError::NotFound)
        ));
        assert!(matches!(store.delete(id).await, Err(PostError::NotFound)));
        assert!(store.find_by_slug("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_newsletter_dedupes() {
        let store = InMemoryNewsletterStore::new();
        assert!(store.subscribe("a@example.com").await.unwrap());
        assert!(!store.subscribe("a@example.com").await.unwrap());
        assert_eq!(store.len().await, 1);
    }
}
