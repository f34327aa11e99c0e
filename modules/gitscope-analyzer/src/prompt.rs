use std::fmt::Write;

use ai_client::util::{collapse_whitespace, truncate_to_char_boundary};
use github_client::{GithubUser, Repository};

use crate::aggregate::{by_popularity, ranked_technologies, ProjectStats};

pub const NARRATIVE_SYSTEM_PROMPT: &str = "You are a technical recruiter writing short, \
factual developer profiles from public GitHub data. Do not invent facts that are not \
in the data.";

/// Repositories listed individually in the prompt.
pub const MAX_PROMPT_PROJECTS: usize = 20;

/// Per-description cap, in bytes.
pub const MAX_DESCRIPTION_BYTES: usize = 200;

/// Render the aggregated statistics and the most popular repositories into
/// the user prompt for the narrative step.
pub fn build_narrative_prompt(
    login: &str,
    user: &GithubUser,
    stats: &ProjectStats,
    repos: &[Repository],
) -> String {
    let mut prompt = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(prompt, "Analyze this GitHub developer profile.\n");
    let _ = writeln!(prompt, "Username: {login}");
    if let Some(name) = user.name.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(prompt, "Name: {name}");
    }
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        let _ = writeln!(prompt, "Bio: {}", collapse_whitespace(bio));
    }
    let _ = writeln!(prompt, "Followers: {}", user.followers.unwrap_or(0));
    let _ = writeln!(prompt, "Following: {}", user.following.unwrap_or(0));
    let _ = writeln!(prompt, "Repositories: {}", stats.project_count);
    let _ = writeln!(prompt, "Total stars: {}", stats.popularity_score);
    let _ = writeln!(prompt, "Total forks: {}", stats.fork_total);

    let languages = ranked_technologies(&stats.technology_usage);
    if languages.is_empty() {
        let _ = writeln!(prompt, "Languages: none detected");
    } else {
        let rendered: Vec<String> = languages
            .iter()
            .map(|(label, count)| format!("{label} ({count})"))
            .collect();
        let _ = writeln!(prompt, "Languages: {}", rendered.join(", "));
    }

    if !repos.is_empty() {
        let _ = writeln!(prompt, "\nRepositories by stars:");
        for repo in by_popularity(repos).into_iter().take(MAX_PROMPT_PROJECTS) {
            let description = repo
                .description
                .as_deref()
                .map(collapse_whitespace)
                .filter(|d| !d.is_empty());
            let description = description
                .as_deref()
                .map(|d| truncate_to_char_boundary(d, MAX_DESCRIPTION_BYTES))
                .unwrap_or("no description");
            let _ = writeln!(
                prompt,
                "- {} | {} | stars: {} | forks: {} | language: {}",
                repo.name,
                description,
                repo.stars(),
                repo.forks(),
                repo.language().unwrap_or("unknown"),
            );
        }
        if repos.len() > MAX_PROMPT_PROJECTS {
            let _ = writeln!(
                prompt,
                "- ... and {} more",
                repos.len() - MAX_PROMPT_PROJECTS
            );
        }
    }

    let _ = write!(
        prompt,
        "\nWrite a concise summary (at most 150 words) covering the developer's \
         strengths, primary technologies, and most notable projects."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;

    fn repo(
        name: &str,
        stars: u64,
        language: Option<&str>,
        description: Option<&str>,
    ) -> Repository {
        Repository {
            name: name.to_string(),
            stargazers_count: Some(stars),
            forks_count: Some(1),
            language: language.map(String::from),
            description: description.map(String::from),
            ..Default::default()
        }
    }

    fn user() -> GithubUser {
        GithubUser {
            login: "alice".into(),
            name: Some("Alice Liddell".into()),
            bio: Some("Builds\ncompilers".into()),
            followers: Some(12),
            following: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn prompt_embeds_statistics() {
        let repos = vec![
            repo("gopher", 10, Some("Go"), Some("A Go tool")),
            repo("gopher2", 5, Some("Go"), None),
            repo("notes", 0, None, None),
        ];
        let stats = summarize(&repos);
        let prompt = build_narrative_prompt("alice", &user(), &stats, &repos);

        assert!(prompt.contains("Username: alice"));
        assert!(prompt.contains("Name: Alice Liddell"));
        assert!(prompt.contains("Bio: Builds compilers"));
        assert!(prompt.contains("Followers: 12"));
        assert!(prompt.contains("Repositories: 3"));
        assert!(prompt.contains("Total stars: 15"));
        assert!(prompt.contains("Languages: Go (2)"));
        assert!(prompt.contains("- gopher | A Go tool | stars: 10 | forks: 1 | language: Go"));
        assert!(prompt.contains("- notes | no description | stars: 0 | forks: 1 | language: unknown"));
    }

    #[test]
    fn most_popular_repos_come_first() {
        let repos = vec![repo("low", 1, None, None), repo("high", 50, None, None)];
        let stats = summarize(&repos);
        let prompt = build_narrative_prompt("alice", &user(), &stats, &repos);
        let high = prompt.find("- high").unwrap();
        let low = prompt.find("- low").unwrap();
        assert!(high < low);
    }

    #[test]
    fn long_listing_is_capped() {
        let repos: Vec<Repository> = (0..25)
            .map(|i| repo(&format!("repo{i:02}"), i, Some("Rust"), None))
            .collect();
        let stats = summarize(&repos);
        let prompt = build_narrative_prompt("alice", &user(), &stats, &repos);
        let listed = prompt.lines().filter(|l| l.starts_with("- repo")).count();
        assert_eq!(listed, MAX_PROMPT_PROJECTS);
        assert!(prompt.contains("- ... and 5 more"));
    }

    #[test]
    fn long_description_is_truncated() {
        let long = "é".repeat(300);
        let repos = vec![repo("wordy", 1, None, Some(&long))];
        let stats = summarize(&repos);
        let prompt = build_narrative_prompt("alice", &user(), &stats, &repos);
        let line = prompt.lines().find(|l| l.starts_with("- wordy")).unwrap();
        assert!(line.len() < long.len());
    }

    #[test]
    fn empty_listing_has_no_repo_section() {
        let stats = summarize(&[]);
        let prompt = build_narrative_prompt("alice", &GithubUser::default(), &stats, &[]);
        assert!(prompt.contains("Languages: none detected"));
        assert!(!prompt.contains("Repositories by stars"));
        assert!(!prompt.contains("Name:"));
    }
}
