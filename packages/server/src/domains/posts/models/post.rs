use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::Category;
use crate::common::PostId;

/// Blog post as stored in the `blog_posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: PostId,

    // Content
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,

    // Byline
    pub author_name: String,
    pub author_role: String,
    pub author_avatar: Option<String>,

    // Listing
    pub publish_date: NaiveDate,
    pub read_time: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub featured: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, fully-resolved fields for an insert or update
#[derive(Debug, Clone, PartialEq)]
pub struct PostInput {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_name: String,
    pub author_role: String,
    pub author_avatar: Option<String>,
    pub publish_date: NaiveDate,
    pub read_time: String,
    pub category: Category,
    pub featured: bool,
}

/// Listing filter for the blog index and the admin table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<Category>,
    pub featured_only: bool,
    pub limit: Option<i64>,
}

impl PostFilter {
    pub fn matches(&self, post: &BlogPost) -> bool {
        self.category.map_or(true, |c| post.category == c) && (!self.featured_only || post.featured)
    }
}

impl BlogPost {
    /// Build a post from validated input (used by stores that do not generate rows)
    pub fn from_input(id: PostId, input: PostInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            image_url: input.image_url,
            author_name: input.author_name,
            author_role: input.author_role,
            author_avatar: input.author_avatar,
            publish_date: input.publish_date,
            read_time: input.read_time,
            category: input.category,
            featured: input.featured,
            created_at: now,
            updated_at: now,
        }
    }

    /// Find post by ID, returning None if not found
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find post by slug, returning None if not found
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts, newest publish date first
    pub async fn list(filter: &PostFilter, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM blog_posts WHERE 1=1");

        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category.as_str());
        }
        if filter.featured_only {
            query.push(" AND featured = true");
        }

        query.push(" ORDER BY publish_date DESC, created_at DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        query.build_query_as::<Self>().fetch_all(pool).await
    }

    /// Insert a new post
    pub async fn create(id: PostId, input: &PostInput, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO blog_posts (
                id, title, slug, excerpt, content, image_url,
                author_name, author_role, author_avatar,
                publish_date, read_time, category, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(&input.author_name)
        .bind(&input.author_role)
        .bind(&input.author_avatar)
        .bind(input.publish_date)
        .bind(&input.read_time)
        .bind(input.category.as_str())
        .bind(input.featured)
        .fetch_one(pool)
        .await
    }

    /// Replace every editable field; None if the post does not exist
    pub async fn update(
        id: PostId,
        input: &PostInput,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE blog_posts SET
                title = $2,
                slug = $3,
                excerpt = $4,
                content = $5,
                image_url = $6,
                author_name = $7,
                author_role = $8,
                author_avatar = $9,
                publish_date = $10,
                read_time = $11,
                category = $12,
                featured = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(&input.author_name)
        .bind(&input.author_role)
        .bind(&input.author_avatar)
        .bind(input.publish_date)
        .bind(&input.read_time)
        .bind(input.category.as_str())
        .bind(input.featured)
        .fetch_optional(pool)
        .await
    }

    /// Delete a post; returns false if nothing was deleted
    pub async fn delete(id: PostId, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
