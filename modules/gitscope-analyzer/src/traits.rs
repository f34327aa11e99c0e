// Trait seam for the directory service.
//
// DirectoryService replaces a direct GithubClient dependency so the
// aggregator can run against MockDirectory in tests: no network.
// The generation seam is ai_client::TextCompletion.

use anyhow::Result;
use async_trait::async_trait;

use github_client::{GithubClient, GithubUser, Repository};

#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch the public profile for `login`.
    async fn profile(&self, login: &str) -> Result<GithubUser>;

    /// Fetch the repository listing for `login`.
    async fn projects(&self, login: &str) -> Result<Vec<Repository>>;
}

#[async_trait]
impl DirectoryService for GithubClient {
    async fn profile(&self, login: &str) -> Result<GithubUser> {
        Ok(self.user(login).await?)
    }

    async fn projects(&self, login: &str) -> Result<Vec<Repository>> {
        Ok(self.repositories(login).await?)
    }
}
