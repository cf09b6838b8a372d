use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::{Post, PostWithAuthorRow};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_limit() -> i64 {
    10
}

fn default_page() -> i64 {
    1
}

impl ListQuery {
    pub const MAX_LIMIT: i64 = 100;

    /// `(limit, offset)` with out-of-range values pulled back in.
    ///
    /// `None` when the page is so far out that the offset does not fit in an `i64`.
    pub fn window(&self) -> Option<(i64, i64)> {
        let limit = self.limit.clamp(1, Self::MAX_LIMIT);
        let page = self.page.max(1);
        let offset = (page - 1).checked_mul(limit)?;
        Some((limit, offset))
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthorSummary>,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub status: &'static str,
    pub results: usize,
    pub posts: Vec<PostResponse>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title,
            content: p.content,
            category: p.category,
            image: p.image,
            created_at: p.created_at,
            updated_at: p.updated_at,
            user: None,
        }
    }
}

impl From<PostWithAuthorRow> for PostResponse {
    fn from(r: PostWithAuthorRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            content: r.content,
            category: r.category,
            image: r.image,
            created_at: r.created_at,
            updated_at: r.updated_at,
            user: Some(AuthorSummary {
                id: r.user_id,
                name: r.author_name,
                email: r.author_email,
                photo: r.author_photo,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: i64, page: i64) -> ListQuery {
        ListQuery { limit, page, search: None }
    }

    #[test]
    fn window_translates_pages_to_offsets() {
        assert_eq!(query(10, 1).window(), Some((10, 0)));
        assert_eq!(query(10, 3).window(), Some((10, 20)));
    }

    #[test]
    fn window_clamps_bad_input() {
        assert_eq!(query(0, 0).window(), Some((1, 0)));
        assert_eq!(query(1_000, -5).window(), Some((ListQuery::MAX_LIMIT, 0)));
    }

    #[test]
    fn window_rejects_offsets_past_i64() {
        let q: ListQuery =
            serde_json::from_str(r#"{"limit":100,"page":9223372036854775807}"#).unwrap();
        assert_eq!(q.window(), None);
        // limit 1 never overflows
        assert_eq!(query(1, i64::MAX).window(), Some((1, i64::MAX - 1)));
    }

    #[test]
    fn defaults_apply_when_query_is_empty() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.window(), Some((10, 0)));
        assert!(q.search.is_none());
    }
}
