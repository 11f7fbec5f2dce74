use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BlogPost, Category, PostInput};
use crate::domains::posts::activities::content::{estimate_read_time, slugify};
use crate::domains::posts::PostError;

/// Raw admin form contents; everything may be blank until validated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_name: String,
    pub author_role: String,
    pub author_avatar: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub read_time: String,
    pub category: Option<Category>,
    pub featured: bool,
}

impl PostDraft {
    /// Pre-fill the form from an existing post
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            author_name: post.author_name.clone(),
            author_role: post.author_role.clone(),
            author_avatar: post.author_avatar.clone(),
            publish_date: Some(post.publish_date),
            read_time: post.read_time.clone(),
            category: Some(post.category),
            featured: post.featured,
        }
    }

    /// Check required fields and resolve derived ones (slug, read time, date)
    pub fn validate(&self, today: NaiveDate) -> Result<PostInput, PostError> {
        let title = required(&self.title, "Title")?;
        let excerpt = required(&self.excerpt, "Excerpt")?;
        let content = required(&self.content, "Content")?;
        let author_name = required(&self.author_name, "Author name")?;
        let category = self
            .category
            .ok_or_else(|| PostError::Validation("Category is required".to_string()))?;

        let slug = if self.slug.trim().is_empty() {
            slugify(&title)
        } else {
            slugify(&self.slug)
        };
        if slug.is_empty() {
            return Err(PostError::Validation(
                "Title must contain at least one letter or number".to_string(),
            ));
        }

        let read_time = match self.read_time.trim() {
            "" => estimate_read_time(&content),
            given => given.to_string(),
        };

        Ok(PostInput {
            title,
            slug,
            excerpt,
            content,
            image_url: optional(&self.image_url),
            author_name,
            author_role: self.author_role.trim().to_string(),
            author_avatar: optional(&self.author_avatar),
            publish_date: self.publish_date.unwrap_or(today),
            read_time,
            category,
            featured: self.featured,
        })
    }
}

fn required(value: &str, field: &str) -> Result<String, PostError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PostError::Validation(format!("{} is required", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn draft() -> PostDraft {
        PostDraft {
            title: "Coping With Winter Blues".to_string(),
            excerpt: "Short days, lower mood.".to_string(),
            content: "<p>Light therapy can help.</p>".to_string(),
            author_name: "Dr. Sarah Johnson".to_string(),
            category: Some(Category::Depression),
            ..Default::default()
        }
    }

    #[test]
    fn test_slug_derived_from_title() {
        let input = draft().validate(today()).unwrap();
        assert_eq!(input.slug, "coping-with-winter-blues");
        assert_eq!(input.publish_date, today());
        assert_eq!(input.read_time, "1 min read");
    }

    #[test]
    fn test_explicit_slug_is_normalised() {
        let mut d = draft();
        d.slug = "  Winter Blues!! ".to_string();
        assert_eq!(d.validate(today()).unwrap().slug, "winter-blues");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(
            d.validate(today()),
            Err(PostError::Validation(msg)) if msg == "Title is required"
        ));

        let mut d = draft();
        d.category = None;
        assert!(matches!(d.validate(today()), Err(PostError::Validation(_))));
    }

    #[test]
    fn test_title_without_alphanumerics_is_rejected() {
        let mut d = draft();
        d.title = "!!!".to_string();
        assert!(matches!(d.validate(today()), Err(PostError::Validation(_))));
    }

    #[test]
    fn test_blank_image_url_becomes_none() {
        let mut d = draft();
        d.image_url = Some("  ".to_string());
        assert_eq!(d.validate(today()).unwrap().image_url, None);
    }

    #[test]
    fn test_deserializes_partial_form() {
        let d: PostDraft =
            serde_json::from_str(r#"{"title":"Hi","category":"self_care","featured":true}"#)
                .unwrap();
        assert_eq!(d.category, Some(Category::SelfCare));
        assert!(d.featured);
        assert!(d.excerpt.is_empty());
    }
}
