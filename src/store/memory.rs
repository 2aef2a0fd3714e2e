use super::{CommentRepository, PostRepository, StoreError};
use crate::blog::{Comment, NewComment, NewPost, Post, PostID};
use crate::pagination::Pagination;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait::async_trait]
impl PostRepository for MemoryStore {
    async fn list(&self, pagination: Pagination) -> Result<(Vec<Post>, usize), StoreError> {
        let posts = self.posts.read().await;
        let total = posts.len();

        Ok((posts[pagination.slice(total).items].to_vec(), total))
    }

    async fn get(&self, id: PostID) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn save(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        // ids start at 1, 0 is reserved for "no id"
        let id = posts.last().map_or(1, |last| last.id + 1);
        let post = post.with_id(id);
        posts.push(post.clone());

        Ok(post)
    }
}

#[async_trait::async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_post(&self, post_id: PostID) -> Result<Vec<Comment>, StoreError> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut comments = self.comments.write().await;
        let id = comments.last().map_or(1, |last| last.id + 1);
        let comment = comment.with_id(id);
        comments.push(comment.clone());

        Ok(comment)
    }
}
