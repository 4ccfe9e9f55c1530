use crate::domain::model::{Session, UsersPage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Replaces the file at `path` with `data`; readers never see a partial file.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn export_file(&self) -> &str;
    fn page_size(&self) -> usize;
    fn export_fields(&self) -> &[String];
    fn include_emails(&self) -> bool;
}

/// The chat server's user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Session>;
    async fn list_users(&self, session: &Session, offset: usize, count: usize) -> Result<UsersPage>;
}
