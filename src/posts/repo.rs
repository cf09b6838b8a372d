use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Row of the `posts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A post joined with the summary of its author.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
    pub author_email: String,
    pub author_photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub image: &'a str,
}

/// `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub category: Option<&'a str>,
    pub image: Option<&'a str>,
}

const WITH_AUTHOR: &str = r#"
    SELECT p.id, p.user_id, p.title, p.content, p.category, p.image, p.created_at, p.updated_at,
           u.name AS author_name, u.email AS author_email, u.photo AS author_photo
      FROM posts p
      JOIN users u ON u.id = p.user_id
"#;

pub async fn list(
    db: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<PostWithAuthorRow>> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", escape_like(s)));

    let rows = sqlx::query_as::<_, PostWithAuthorRow>(&format!(
        r#"{WITH_AUTHOR}
         WHERE $1::text IS NULL OR p.title ILIKE $1
         ORDER BY p.created_at DESC, p.id
         LIMIT $2 OFFSET $3"#
    ))
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<PostWithAuthorRow>> {
    let row = sqlx::query_as::<_, PostWithAuthorRow>(&format!("{WITH_AUTHOR} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Owner id of a post, without loading the rest.
pub async fn owner_of(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Uuid>> {
    let owner = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(owner)
}

/// Fails with a foreign-key violation when `user_id` has no row in `users`.
pub async fn create(db: &PgPool, user_id: Uuid, new: &NewPost<'_>) -> anyhow::Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, title, content, category, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, title, content, category, image, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(new.title)
    .bind(new.content)
    .bind(new.category)
    .bind(new.image)
    .fetch_one(db)
    .await?;
    Ok(post)
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    changes: &PostChanges<'_>,
) -> anyhow::Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
           SET title      = COALESCE($2, title),
               content    = COALESCE($3, content),
               category   = COALESCE($4, category),
               image      = COALESCE($5, image),
               updated_at = now()
         WHERE id = $1
        RETURNING id, user_id, title, content, category, image, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(changes.title)
    .bind(changes.content)
    .bind(changes.category)
    .bind(changes.image)
    .fetch_optional(db)
    .await?;
    Ok(post)
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn count_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;
    Ok(n)
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%_sure\\"), "100\\%\\_sure\\\\");
    }
}
