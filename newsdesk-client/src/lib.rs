mod config;
pub use config::{SeedConfig, StoreConfig, DEFAULT_STORAGE_KEY};

mod error;
pub use error::{Error, Result};

mod storage;
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use storage::JsonFileStorage;

mod store;
pub use store::CommentStore;

mod thread;
pub use thread::{ChildIndex, CommentView, Thread};

mod time;
pub use time::RelativeTime;

pub mod api {
    pub use newsdesk_api::*;
}
