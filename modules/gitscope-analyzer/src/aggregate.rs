use github_client::Repository;
use gitscope_common::{ProjectSummary, TechnologyUsage};

/// How many repositories the record lists under `top_repos`.
pub const TOP_PROJECT_COUNT: usize = 5;

/// Totals computed in one pass over a repository listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub project_count: u64,
    pub popularity_score: u64,
    pub fork_total: u64,
    pub technology_usage: TechnologyUsage,
}

/// Reduce a repository listing. Absent star/fork counts count as 0;
/// repositories without a language are left out of `technology_usage`.
pub fn summarize(repos: &[Repository]) -> ProjectStats {
    repos.iter().fold(ProjectStats::default(), |mut stats, repo| {
        stats.project_count += 1;
        stats.popularity_score += repo.stars();
        stats.fork_total += repo.forks();
        if let Some(language) = repo.language() {
            *stats
                .technology_usage
                .entry(language.to_string())
                .or_insert(0) += 1;
        }
        stats
    })
}

/// Technology usage ordered by count descending, then label.
pub fn ranked_technologies(usage: &TechnologyUsage) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = usage.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Repositories ordered by stars descending, then name. Stable for ties.
pub fn by_popularity(repos: &[Repository]) -> Vec<&Repository> {
    let mut sorted: Vec<&Repository> = repos.iter().collect();
    sorted.sort_by(|a, b| b.stars().cmp(&a.stars()).then_with(|| a.name.cmp(&b.name)));
    sorted
}

pub fn project_summary(repo: &Repository) -> ProjectSummary {
    ProjectSummary {
        name: repo.name.clone(),
        description: repo
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
        stars: repo.stars(),
        forks: repo.forks(),
        language: repo.language().map(String::from),
        url: repo.html_url.clone(),
    }
}

pub fn top_projects(repos: &[Repository], limit: usize) -> Vec<ProjectSummary> {
    by_popularity(repos)
        .into_iter()
        .take(limit)
        .map(project_summary)
        .collect()
}
