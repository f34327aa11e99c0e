use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Placeholder text when no generation credential is configured.
pub const NARRATIVE_UNAVAILABLE: &str = "AI summary unavailable (no API key configured)";

/// Language label → number of repositories whose primary language it is.
pub type TechnologyUsage = BTreeMap<String, u64>;

// --- Narrative ---

/// Outcome of the optional narrative step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrative {
    /// Text returned by the generation service, verbatim.
    Generated(String),
    /// The generation call failed; carries the failure detail.
    Failed(String),
    /// No credential configured, so no call was made.
    Unavailable,
}

impl Narrative {
    pub fn status(&self) -> &'static str {
        match self {
            Narrative::Generated(_) => "generated",
            Narrative::Failed(_) => "failed",
            Narrative::Unavailable => "unavailable",
        }
    }

    /// Human-readable text for display.
    pub fn text(&self) -> String {
        match self {
            Narrative::Generated(text) => text.clone(),
            Narrative::Failed(detail) => format!("AI summary failed: {detail}"),
            Narrative::Unavailable => NARRATIVE_UNAVAILABLE.to_string(),
        }
    }
}

impl Serialize for Narrative {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Narrative", 2)?;
        state.serialize_field("status", self.status())?;
        state.serialize_field("text", &self.text())?;
        state.end()
    }
}

// --- Project summary ---

/// The per-repository fields surfaced in the record and fed into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub url: Option<String>,
}

// --- Profile record ---

/// Aggregated view of one developer, built fresh per request.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRecord {
    #[serde(rename = "username")]
    pub identifier: String,
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    #[serde(rename = "avatar")]
    pub avatar_reference: Option<String>,
    #[serde(rename = "bio")]
    pub biography: Option<String>,
    #[serde(rename = "followers")]
    pub follower_count: Option<u64>,
    #[serde(rename = "following")]
    pub following_count: Option<u64>,
    /// Entries in the retrieved listing, which may be a truncated first page.
    #[serde(rename = "repos")]
    pub project_count: u64,
    /// GitHub's own count of public repositories.
    #[serde(rename = "public_repos")]
    pub reported_project_count: Option<u64>,
    #[serde(rename = "stars")]
    pub popularity_score: u64,
    #[serde(rename = "forks")]
    pub fork_total: u64,
    #[serde(rename = "languages")]
    pub technology_usage: TechnologyUsage,
    #[serde(rename = "top_repos")]
    pub top_projects: Vec<ProjectSummary>,
    #[serde(rename = "summary")]
    pub narrative: Narrative,
    pub analyzed_at: DateTime<Utc>,
}
