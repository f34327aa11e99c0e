pub mod error;
pub mod types;

pub use error::{GithubError, Result};
pub use types::{GithubUser, Repository};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use types::ErrorBody;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = "gitscope";

pub struct GithubClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let base_url =
            Url::parse(base_url).map_err(|e| GithubError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Fetch a user's public profile.
    pub async fn user(&self, login: &str) -> Result<GithubUser> {
        let url = self.endpoint(&["users", login])?;
        tracing::debug!(login, "Fetching GitHub user");
        self.get_json(url, login).await
    }

    /// Fetch the first page of a user's public repositories, as GitHub returns it.
    pub async fn repositories(&self, login: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", login, "repos"])?;
        tracing::debug!(login, "Fetching GitHub repositories");
        let repos: Vec<Repository> = self.get_json(url, login).await?;
        tracing::debug!(login, count = repos.len(), "Fetched GitHub repositories");
        Ok(repos)
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so a login containing `/`, `?` or `#` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, login: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound(login.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: api_message(&body),
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pull `message` out of a GitHub error body, falling back to the raw text.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github(base_url: &str) -> GithubClient {
        GithubClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let client = github("https://ghe.example.com/api/v3/");
        let url = client.endpoint(&["users", "octocat", "repos"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/octocat/repos");

        let client = github("https://api.github.com");
        let url = client.endpoint(&["users", "octocat"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/octocat");
    }

    #[test]
    fn login_stays_one_path_segment() {
        let client = github("https://api.github.com");
        let url = client.endpoint(&["users", "a/b?x=1#y"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/a%2Fb%3Fx=1%23y");
        assert_eq!(url.path_segments().unwrap().count(), 2);
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        for bad in ["not a url", "mailto:someone@example.com"] {
            assert!(matches!(
                GithubClient::new(bad, Duration::from_secs(5)),
                Err(GithubError::InvalidBaseUrl(_))
            ));
        }
    }

    #[test]
    fn api_message_prefers_json_message() {
        let body = r#"{"message": "API rate limit exceeded", "documentation_url": "x"}"#;
        assert_eq!(api_message(body), "API rate limit exceeded");
        assert_eq!(api_message("Bad Gateway"), "Bad Gateway");
    }
}
