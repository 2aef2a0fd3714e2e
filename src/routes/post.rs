use crate::blog::{Comment, Post, PostID};
use crate::error::BlogError;
use crate::state::{NestedRouter, SharedState, State};
use axum::extract::Path;
use axum::routing::get;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostDetailView {
    pub post: PostWithComments,
}

#[derive(Debug, Serialize)]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/post", get(get_post))
        .route("/post/:id", get(get_post))
}

async fn get_post(
    axum::extract::State(state): SharedState,
    id: Option<Path<String>>,
) -> Result<Json<PostDetailView>, BlogError> {
    // a missing or non-numeric id reads as 0
    let id = id
        .and_then(|Path(id)| super::route_number(&id))
        .unwrap_or(0);

    Ok(Json(show_post(&state, id).await?))
}

pub async fn show_post(state: &State, id: PostID) -> Result<PostDetailView, BlogError> {
    if id == 0 {
        return Err(BlogError::MissingIdentifier);
    }

    let Some(post) = state.posts.get(id).await? else {
        return Err(BlogError::NotFound(id));
    };
    let comments = state.comments.find_by_post(post.id).await?;

    tracing::debug!("showing post {id} with {} comments", comments.len());

    Ok(PostDetailView {
        post: PostWithComments { post, comments },
    })
}
