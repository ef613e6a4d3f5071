use chrono::Utc;

pub use uuid::Uuid;
pub type Time = chrono::DateTime<Utc>;

mod article;
pub use article::{Article, ArticleId};

mod comment;
pub use comment::{Comment, CommentId};

mod db;
pub use db::{ContentCatalog, Storage, UserDirectory};

mod error;
pub use error::Error;

mod user;
pub use user::{UserId, UserProfile};
