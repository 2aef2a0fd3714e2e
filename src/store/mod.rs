//! Table gateways for posts and comments.
//!
//! Both stores keep rows in ascending id order, which is also the order
//! they were saved in.

use crate::blog::{Comment, NewComment, NewPost, Post, PostID};
use crate::pagination::Pagination;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stored record: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
pub trait PostRepository: Send + Sync {
    /// One page of posts plus the total number of posts.
    async fn list(&self, pagination: Pagination) -> Result<(Vec<Post>, usize), StoreError>;

    /// `Ok(None)` if no post has this id.
    async fn get(&self, id: PostID) -> Result<Option<Post>, StoreError>;

    async fn save(&self, post: NewPost) -> Result<Post, StoreError>;
}

#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    /// Every comment whose `post_id` matches, oldest first.
    async fn find_by_post(&self, post_id: PostID) -> Result<Vec<Comment>, StoreError>;

    async fn save(&self, comment: NewComment) -> Result<Comment, StoreError>;
}
