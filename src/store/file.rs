//! JSON-on-disk store.
//!
//! Layout under the store root:
//! - `post/<id>.json`
//! - `comment/<id>.json`

use super::{CommentRepository, PostRepository, StoreError};
use crate::blog::{Comment, NewComment, NewPost, Post, PostID};
use crate::pagination::Pagination;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const POST_DIR: &str = "post";
const COMMENT_DIR: &str = "comment";

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // serializes id assignment
    save_lock: Mutex<()>,
}

impl FileStore {
    pub async fn open(root: impl Into<PathBuf>) -> Result<FileStore, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(POST_DIR)).await?;
        tokio::fs::create_dir_all(root.join(COMMENT_DIR)).await?;

        tracing::debug!("opened file store at {root:?}");

        Ok(FileStore {
            root,
            save_lock: Mutex::new(()),
        })
    }

    fn table(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Ids of every record in a table directory, ascending.
async fn record_ids(table: &Path) -> Result<Vec<u64>, StoreError> {
    let mut entries = tokio::fs::read_dir(table).await?;
    let mut ids = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u64>().ok())
        else {
            tracing::warn!("ignoring unexpected file {path:?} in store");
            continue;
        };
        ids.push(id);
    }

    ids.sort_unstable();
    Ok(ids)
}

async fn read_record<T: DeserializeOwned>(table: &Path, id: u64) -> Result<Option<T>, StoreError> {
    let bytes = match tokio::fs::read(table.join(format!("{id}.json"))).await {
        Ok(it) => it,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Writes next to the record and renames over it, so readers never see a
/// partly written file.
async fn write_record<T: Serialize>(table: &Path, id: u64, record: &T) -> Result<(), StoreError> {
    let tmp_path = table.join(format!("{id}.json.tmp"));
    tokio::fs::write(&tmp_path, serde_json::to_vec(record)?).await?;
    tokio::fs::rename(&tmp_path, table.join(format!("{id}.json"))).await?;

    Ok(())
}

#[async_trait::async_trait]
impl PostRepository for FileStore {
    async fn list(&self, pagination: Pagination) -> Result<(Vec<Post>, usize), StoreError> {
        let table = self.table(POST_DIR);
        let ids = record_ids(&table).await?;
        let total = ids.len();

        let mut posts = Vec::with_capacity(pagination.limit());
        for id in &ids[pagination.slice(total).items] {
            // a post deleted between listing and reading just drops out
            if let Some(post) = read_record::<Post>(&table, *id).await? {
                posts.push(post);
            }
        }

        Ok((posts, total))
    }

    async fn get(&self, id: PostID) -> Result<Option<Post>, StoreError> {
        read_record(&self.table(POST_DIR), id).await
    }

    async fn save(&self, post: NewPost) -> Result<Post, StoreError> {
        let _guard = self.save_lock.lock().await;
        let table = self.table(POST_DIR);

        let id = record_ids(&table).await?.last().map_or(1, |last| last + 1);
        let post = post.with_id(id);
        write_record(&table, id, &post).await?;

        Ok(post)
    }
}

#[async_trait::async_trait]
impl CommentRepository for FileStore {
    async fn find_by_post(&self, post_id: PostID) -> Result<Vec<Comment>, StoreError> {
        let table = self.table(COMMENT_DIR);

        let mut comments = Vec::new();
        for id in record_ids(&table).await? {
            let Some(comment) = read_record::<Comment>(&table, id).await? else {
                continue;
            };
            if comment.post_id == post_id {
                comments.push(comment);
            }
        }

        Ok(comments)
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let _guard = self.save_lock.lock().await;
        let table = self.table(COMMENT_DIR);

        let id = record_ids(&table).await?.last().map_or(1, |last| last + 1);
        let comment = comment.with_id(id);
        write_record(&table, id, &comment).await?;

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::fixtures::{new_comment, new_post};

    #[tokio::test]
    async fn records_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::open(dir.path()).await.unwrap();
        let first = PostRepository::save(&store, new_post()).await.unwrap();
        let second = PostRepository::save(&store, new_post()).await.unwrap();
        drop(store);

        let store = FileStore::open(dir.path()).await.unwrap();
        let (posts, total) = store.list(Pagination::new(1, 10)).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(posts, vec![first, second.clone()]);

        let third = PostRepository::save(&store, new_post()).await.unwrap();
        assert_eq!(third.id, second.id + 1);
    }

    #[tokio::test]
    async fn ids_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        for _ in 0..12 {
            PostRepository::save(&store, new_post()).await.unwrap();
        }

        let (posts, total) = store.list(Pagination::new(2, 10)).await.unwrap();
        assert_eq!(total, 12);
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11, 12]);
    }

    #[tokio::test]
    async fn description_is_stored_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let saved = PostRepository::save(&store, new_post()).await.unwrap();

        let loaded = store.get(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.description, "Apple buys <b>Coderockr</b><br> ");
    }

    #[tokio::test]
    async fn missing_post_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comments_are_filtered_by_post() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        let a = CommentRepository::save(&store, new_comment(1)).await.unwrap();
        CommentRepository::save(&store, new_comment(2)).await.unwrap();
        let c = CommentRepository::save(&store, new_comment(1)).await.unwrap();

        assert_eq!(store.find_by_post(1).await.unwrap(), vec![a, c]);
    }

    #[tokio::test]
    async fn saving_leaves_only_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let saved = PostRepository::save(&store, new_post()).await.unwrap();

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path().join("post")).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().into_string().unwrap());
        }
        assert_eq!(names, vec![format!("{}.json", saved.id)]);
    }

    #[tokio::test]
    async fn leftover_temp_file_is_not_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("post").join("1.json.tmp"), b"{\"id\":")
            .await
            .unwrap();

        let (posts, total) = store.list(Pagination::new(1, 10)).await.unwrap();
        assert!(posts.is_empty());
        assert_eq!(total, 0);

        let saved = PostRepository::save(&store, new_post()).await.unwrap();
        assert_eq!(store.get(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("post").join("1.json"), b"not json")
            .await
            .unwrap();

        assert!(matches!(store.get(1).await, Err(StoreError::Json(_))));
    }
}
