// Test mocks for the aggregator.
//
// Two mocks matching the two trait boundaries:
// - MockDirectory (DirectoryService): HashMap-based login → profile / repos
// - MockCompletion (TextCompletion): canned reply or canned failure
//
// Both count calls so tests can assert that no request was made.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ai_client::TextCompletion;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use github_client::{GithubUser, Repository};

use crate::traits::DirectoryService;

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

pub fn user(login: &str) -> GithubUser {
    GithubUser {
        login: login.to_string(),
        name: Some(format!("{login} (test)")),
        avatar_url: Some(format!("https://avatars.example.com/{login}")),
        bio: None,
        followers: Some(10),
        following: Some(2),
        public_repos: None,
    }
}

pub fn repo(name: &str, stars: u64, language: Option<&str>) -> Repository {
    Repository {
        name: name.to_string(),
        stargazers_count: Some(stars),
        forks_count: Some(0),
        language: language.map(String::from),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// MockDirectory
// ---------------------------------------------------------------------------

/// Returns `Err` for any login without a registered profile or repo listing.
/// Builder pattern: `.on_profile()`, `.on_projects()`.
#[derive(Default)]
pub struct MockDirectory {
    profiles: HashMap<String, GithubUser>,
    projects: HashMap<String, Vec<Repository>>,
    profile_calls: AtomicUsize,
    project_calls: AtomicUsize,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_profile(mut self, profile: GithubUser) -> Self {
        self.profiles.insert(profile.login.clone(), profile);
        self
    }

    pub fn on_projects(mut self, login: &str, repos: Vec<Repository>) -> Self {
        self.projects.insert(login.to_string(), repos);
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn project_calls(&self) -> usize {
        self.project_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.profile_calls() + self.project_calls()
    }
}

#[async_trait]
impl DirectoryService for MockDirectory {
    async fn profile(&self, login: &str) -> Result<GithubUser> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .get(login)
            .cloned()
            .ok_or_else(|| anyhow!("MockDirectory: no profile registered for {login}"))
    }

    async fn projects(&self, login: &str) -> Result<Vec<Repository>> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        self.projects
            .get(login)
            .cloned()
            .ok_or_else(|| anyhow!("MockDirectory: no projects registered for {login}"))
    }
}

// ---------------------------------------------------------------------------
// MockCompletion
// ---------------------------------------------------------------------------

/// Replies with a fixed text, or fails with a fixed message.
/// Records every user prompt it receives.
pub struct MockCompletion {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn chat_completion(&self, _system: &str, user: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(user.to_string());
        }
        self.reply.clone().map_err(|message| anyhow!(message))
    }
}
