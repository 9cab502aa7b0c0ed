//! Persisted client state
//!
//! A small synchronous key/value store standing in for browser-local storage.
//! Only two keys are ever written: the session token and the theme preference.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Key under which the session token is persisted
pub const TOKEN_KEY: &str = "token";

/// Key under which the theme preference is persisted
pub const THEME_KEY: &str = "theme";

pub trait PersistentStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 删除不存在的 key 不算错误
    fn remove(&self, key: &str) -> Result<()>;
}
