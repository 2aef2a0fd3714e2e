use crate::blog::{Post, PAGE_SIZE};
use crate::error::BlogError;
use crate::pagination::{Page, Pagination};
use crate::state::{NestedRouter, SharedState, State};
use axum::extract::Path;
use axum::routing::get;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostListView {
    pub posts: Page<Post>,
}

pub fn route() -> NestedRouter {
    let compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Default);

    axum::Router::new()
        .route("/", get(get_page))
        .route("/page", get(get_page))
        .route("/page/:page", get(get_page))
        .layer(compression_layer)
}

async fn get_page(
    axum::extract::State(state): SharedState,
    page: Option<Path<String>>,
) -> Result<Json<PostListView>, BlogError> {
    // anything that isn't a page number falls back to the first page
    let page = page
        .and_then(|Path(page)| super::route_number(&page))
        .map_or(1, |page| u32::try_from(page).unwrap_or(u32::MAX));

    Ok(Json(list_posts(&state, page).await?))
}

pub async fn list_posts(state: &State, page: u32) -> Result<PostListView, BlogError> {
    let pagination = Pagination::new(page, PAGE_SIZE);
    let (posts, total) = state.posts.list(pagination).await?;

    tracing::debug!(
        "listing page {} with {} of {total} posts",
        pagination.current_page,
        posts.len()
    );

    Ok(PostListView {
        posts: Page::from_parts(pagination, posts, total),
    })
}
