use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreatePostRequest, ListQuery, PostListResponse, PostResponse, UpdatePostRequest},
    repo::{self, NewPost, PostChanges},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// 404 when the post is gone, 403 when someone else owns it.
async fn ensure_owner(state: &AppState, post_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    match repo::owner_of(&state.db, post_id).await? {
        None => Err(ApiError::NotFound(format!("No post with this id: {post_id} found"))),
        Some(owner) if owner != user_id => {
            warn!(%post_id, %user_id, %owner, "post owned by another user");
            Err(ApiError::Forbidden("You are not allowed to perform this action".into()))
        }
        Some(_) => Ok(()),
    }
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let (limit, offset) = q
        .window()
        .ok_or_else(|| ApiError::BadRequest("page is out of range".into()))?;
    let rows = repo::list(&state.db, q.search.as_deref(), limit, offset).await?;
    let posts: Vec<PostResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(PostListResponse {
        status: "success",
        results: posts.len(),
        posts,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    require_non_empty("title", &payload.title)?;
    require_non_empty("content", &payload.content)?;
    require_non_empty("category", &payload.category)?;

    let post = repo::create(
        &state.db,
        user_id,
        &NewPost {
            title: payload.title.trim(),
            content: &payload.content,
            category: payload.category.trim(),
            image: payload.image.trim(),
        },
    )
    .await?;

    info!(post_id = %post.id, %user_id, "post created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let row = repo::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No post with this id: {id} found")))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    for (field, value) in [
        ("title", &payload.title),
        ("content", &payload.content),
        ("category", &payload.category),
    ] {
        if let Some(value) = value {
            require_non_empty(field, value)?;
        }
    }
    ensure_owner(&state, id, user_id).await?;

    let changes = PostChanges {
        title: payload.title.as_deref().map(str::trim),
        content: payload.content.as_deref(),
        category: payload.category.as_deref().map(str::trim),
        image: payload.image.as_deref().map(str::trim),
    };
    // the post can vanish between the ownership check and the update
    let post = repo::update(&state.db, id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No post with this id: {id} found")))?;

    info!(post_id = %id, %user_id, "post updated");
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_owner(&state, id, user_id).await?;
    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("No post with this id: {id} found")));
    }
    info!(post_id = %id, %user_id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
