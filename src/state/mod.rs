use crate::store::{CommentRepository, FileStore, MemoryStore, PostRepository, StoreError};
use std::sync::Arc;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

pub struct State {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl State {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> State {
        State { posts, comments }
    }

    pub fn in_memory() -> State {
        let store = Arc::new(MemoryStore::new());
        State::new(store.clone(), store)
    }

    pub async fn on_disk(path: &std::path::Path) -> Result<State, StoreError> {
        let store = Arc::new(FileStore::open(path).await?);
        Ok(State::new(store.clone(), store))
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
