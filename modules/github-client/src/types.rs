use serde::Deserialize;

/// A public user profile from `GET /users/{login}`.
///
/// Every field GitHub may omit or null out is optional; callers decide defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub public_repos: Option<u64>,
}

/// A single repository from `GET /users/{login}/repos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    /// Primary language as detected by GitHub. `null` for empty or docs-only repos.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Repository {
    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn forks(&self) -> u64 {
        self.forks_count.unwrap_or(0)
    }

    /// The language label, with blank strings treated as absent.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Error body GitHub returns alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
