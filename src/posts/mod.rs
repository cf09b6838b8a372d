use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;

pub use repo::{NewPost, Post, PostChanges};

pub fn router() -> Router<AppState> {
    handlers::post_routes()
}
