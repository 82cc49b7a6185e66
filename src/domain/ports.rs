use crate::domain::model::{DeveloperRecord, NewDeveloper};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Remote collection of developer records.
///
/// `list_all` is safe to repeat; `create` is not, and implementations must
/// not retry it on their own.
///
/// `create` yields `Ok(None)` when the store confirmed the creation but its
/// copy of the persisted record could not be read.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<DeveloperRecord>>;
    async fn create(&self, developer: &NewDeveloper) -> Result<Option<DeveloperRecord>>;
}
