use serde::{Deserialize, Serialize};

pub type PostID = u64;
pub type CommentID = u64;

/// Number of posts shown on one page of the index.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostID,
    pub title: String,
    // stored verbatim, may contain markup
    pub description: String,
    pub post_date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentID,
    pub post_id: PostID,
    pub description: String,
    pub name: String,
    pub email: String,
    pub webpage: String,
    pub comment_date: chrono::DateTime<chrono::Utc>,
}

/// A post that has not been given an id by storage yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub post_date: chrono::DateTime<chrono::Utc>,
}

/// A comment that has not been given an id by storage yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostID,
    pub description: String,
    pub name: String,
    pub email: String,
    pub webpage: String,
    pub comment_date: chrono::DateTime<chrono::Utc>,
}

impl NewPost {
    pub fn with_id(self, id: PostID) -> Post {
        Post {
            id,
            title: self.title,
            description: self.description,
            post_date: self.post_date,
        }
    }
}

impl NewComment {
    pub fn with_id(self, id: CommentID) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            description: self.description,
            name: self.name,
            email: self.email,
            webpage: self.webpage,
            comment_date: self.comment_date,
        }
    }
}
