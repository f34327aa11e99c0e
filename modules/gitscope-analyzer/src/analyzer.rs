use std::sync::Arc;

use ai_client::{Claude, OpenAi, TextCompletion};
use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use github_client::{GithubClient, GithubUser, Repository};
use gitscope_common::{
    AnalyzeError, Config, Narrative, NarrativeProvider, ProfileRecord, ProjectListPolicy,
};

use crate::aggregate::{summarize, top_projects, ProjectStats, TOP_PROJECT_COUNT};
use crate::prompt::{build_narrative_prompt, NARRATIVE_SYSTEM_PROMPT};
use crate::traits::DirectoryService;

/// Fetches a GitHub profile and its repositories, reduces them into a
/// [`ProfileRecord`], and optionally asks a language model for a narrative.
///
/// Holds no mutable state; one instance serves every request.
pub struct ProfileAggregator {
    directory: Arc<dyn DirectoryService>,
    generator: Option<Arc<dyn TextCompletion>>,
    project_list_policy: ProjectListPolicy,
}

impl ProfileAggregator {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self {
            directory,
            generator: None,
            project_list_policy: ProjectListPolicy::default(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextCompletion>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_project_list_policy(mut self, policy: ProjectListPolicy) -> Self {
        self.project_list_policy = policy;
        self
    }

    /// Wire up the GitHub client and, when the selected provider has a key,
    /// the generation client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let github = GithubClient::new(&config.github_api_url, config.http_timeout)?;
        let mut aggregator =
            Self::new(Arc::new(github)).with_project_list_policy(config.project_list_policy);

        if let Some(api_key) = config.narrative_api_key() {
            let generator: Arc<dyn TextCompletion> = match config.narrative_provider {
                NarrativeProvider::OpenAi => {
                    let model = config
                        .narrative_model
                        .as_deref()
                        .unwrap_or(ai_client::openai::DEFAULT_MODEL);
                    Arc::new(OpenAi::new(api_key, model).with_timeout(config.http_timeout)?)
                }
                NarrativeProvider::Anthropic => {
                    let model = config
                        .narrative_model
                        .as_deref()
                        .unwrap_or(ai_client::claude::DEFAULT_MODEL);
                    Arc::new(Claude::new(api_key, model).with_timeout(config.http_timeout)?)
                }
            };
            info!(
                provider = generator.provider(),
                model = generator.model(),
                "Narrative generation enabled"
            );
            aggregator = aggregator.with_generator(generator);
        } else {
            info!(
                provider = %config.narrative_provider,
                "No generation credential configured, narrative disabled"
            );
        }

        Ok(aggregator)
    }

    pub fn narrative_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn aggregate(&self, identifier: &str) -> Result<ProfileRecord, AnalyzeError> {
        let login = validate_identifier(identifier)?;

        let user = self.directory.profile(login).await.map_err(|e| {
            info!(login, error = %e, "Profile lookup failed");
            AnalyzeError::SubjectNotFound(e.to_string())
        })?;

        let repos = self.fetch_projects(login).await?;
        let stats = summarize(&repos);
        info!(
            login,
            repos = stats.project_count,
            stars = stats.popularity_score,
            languages = stats.technology_usage.len(),
            "Profile aggregated"
        );

        let narrative = self.narrate(login, &user, &stats, &repos).await;

        Ok(build_record(login, user, stats, &repos, narrative))
    }

    async fn fetch_projects(&self, login: &str) -> Result<Vec<Repository>, AnalyzeError> {
        match self.directory.projects(login).await {
            Ok(repos) => Ok(repos),
            Err(e) => match self.project_list_policy {
                ProjectListPolicy::Lenient => {
                    warn!(login, error = %e, "Repository lookup failed, continuing with none");
                    Ok(Vec::new())
                }
                ProjectListPolicy::Strict => {
                    info!(login, error = %e, "Repository lookup failed");
                    Err(AnalyzeError::SubjectNotFound(e.to_string()))
                }
            },
        }
    }

    async fn narrate(
        &self,
        login: &str,
        user: &GithubUser,
        stats: &ProjectStats,
        repos: &[Repository],
    ) -> Narrative {
        let Some(generator) = &self.generator else {
            return Narrative::Unavailable;
        };

        let prompt = build_narrative_prompt(login, user, stats, repos);
        match generator
            .chat_completion(NARRATIVE_SYSTEM_PROMPT, &prompt)
            .await
        {
            Ok(text) => Narrative::Generated(text),
            Err(e) => {
                warn!(
                    login,
                    provider = generator.provider(),
                    error = %e,
                    "Narrative generation failed"
                );
                Narrative::Failed(e.to_string())
            }
        }
    }
}

/// Trim the identifier; only an empty result is rejected. Anything else is
/// left for the directory to resolve.
pub fn validate_identifier(identifier: &str) -> Result<&str, AnalyzeError> {
    let login = identifier.trim();
    if login.is_empty() {
        return Err(AnalyzeError::InvalidInput("Username is required".to_string()));
    }
    Ok(login)
}

fn build_record(
    login: &str,
    user: GithubUser,
    stats: ProjectStats,
    repos: &[Repository],
    narrative: Narrative,
) -> ProfileRecord {
    let identifier = if user.login.is_empty() {
        login.to_string()
    } else {
        user.login
    };

    ProfileRecord {
        identifier,
        display_name: user.name,
        avatar_reference: user.avatar_url,
        biography: user.bio,
        follower_count: user.followers,
        following_count: user.following,
        project_count: stats.project_count,
        reported_project_count: user.public_repos,
        popularity_score: stats.popularity_score,
        fork_total: stats.fork_total,
        technology_usage: stats.technology_usage,
        top_projects: top_projects(repos, TOP_PROJECT_COUNT),
        narrative,
        analyzed_at: Utc::now(),
    }
}
