//! Plain-text rendering of results pages, user details, and store listings.

use crate::profile::UserDetails;
use crate::results::ResultsView;
use crate::store::records::Profession;

pub fn format_results(view: &ResultsView) -> String {
    let mut out = format!(
        "Results for \"{}\" by {} — {} matches\n\n",
        view.query, view.criterion, view.total_count
    );

    if view.rows.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    for row in &view.rows {
        out.push_str(&format!("- {} ({})\n", row.login, row.url));
    }

    out.push_str(&format!(
        "\nPage {} of {}",
        view.page,
        view.page_count.max(1)
    ));
    if !view.links.is_empty() {
        out.push_str("  |  pages: ");
        let rendered: Vec<String> = view
            .links
            .iter()
            .map(|link| match &link.path {
                Some(path) => format!("{} ({path})", link.number),
                None => format!("[{}]", link.number),
            })
            .collect();
        out.push_str(&rendered.join("  "));
    }
    out.push('\n');
    out
}

pub fn format_user_details(details: &UserDetails) -> String {
    let profile = &details.profile;
    let mut out = format!("# {}", profile.login);
    if let Some(ref name) = profile.name {
        out.push_str(&format!(" ({name})"));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", profile.html_url));

    if let Some(ref bio) = profile.bio {
        out.push_str(&format!("\n{bio}\n"));
    }
    for (label, value) in [
        ("Company", &profile.company),
        ("Location", &profile.location),
        ("Email", &profile.email),
        ("Blog", &profile.blog),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }
    if profile.hireable == Some(true) {
        out.push_str("Hireable: yes\n");
    }
    out.push_str(&format!("Public repos: {}\n", profile.public_repos));

    if !details.languages.is_empty() {
        out.push_str("\nLanguages:\n");
        for (language, bytes) in &details.languages {
            out.push_str(&format!("  {language}: {bytes} bytes\n"));
        }
    }

    if !details.repositories.is_empty() {
        out.push_str("\nRepositories:\n");
        for repo in &details.repositories {
            out.push_str(&format!("  {}", repo.full_name));
            if let Some(ref language) = repo.language {
                out.push_str(&format!(" [{language}]"));
            }
            if let Some(ref description) = repo.description {
                out.push_str(&format!(" — {description}"));
            }
            out.push_str(&format!(
                " (stars: {}, forks: {})\n    {}\n",
                repo.stargazers_count, repo.forks_count, repo.html_url
            ));
        }
    }
    out
}

pub fn format_languages(names: &[String]) -> String {
    if names.is_empty() {
        return "No known languages cached.\n".to_string();
    }
    let mut out = format!("{} known languages:\n", names.len());
    for name in names {
        out.push_str(&format!("- {name}\n"));
    }
    out
}

pub fn format_professions(professions: &[Profession]) -> String {
    if professions.is_empty() {
        return "No professions stored.\n".to_string();
    }
    let mut out = String::new();
    for profession in professions {
        out.push_str(&format!(
            "- {}: {}\n",
            profession.name,
            profession.skills_list().join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{PageLink, UserRow};
    use crate::search::Criterion;

    fn sample_view() -> ResultsView {
        ResultsView {
            criterion: Criterion::Username,
            query: "octo".into(),
            page: 2,
            page_count: 4,
            total_count: 95,
            rows: vec![UserRow {
                login: "octocat".into(),
                url: "https://github.com/octocat".into(),
            }],
            links: vec![
                PageLink {
                    number: 1,
                    path: Some("results/username/octo/1".into()),
                },
                PageLink {
                    number: 2,
                    path: None,
                },
            ],
        }
    }

    #[test]
    fn format_results_lists_rows_and_pages() {
        let text = format_results(&sample_view());
        assert!(text.contains("95 matches"));
        assert!(text.contains("- octocat (https://github.com/octocat)"));
        assert!(text.contains("Page 2 of 4"));
        assert!(text.contains("1 (results/username/octo/1)"));
        assert!(text.contains("[2]"));
    }

    #[test]
    fn format_results_empty_page() {
        let view = ResultsView {
            rows: vec![],
            links: vec![],
            ..sample_view()
        };
        let text = format_results(&view);
        assert!(text.contains("No results."));
    }

    #[test]
    fn format_user_details_includes_profile_and_tally() {
        use crate::github::types::UserProfile;
        let details = UserDetails {
            profile: UserProfile {
                login: "octocat".into(),
                name: Some("The Octocat".into()),
                bio: Some("likes git".into()),
                blog: None,
                company: Some("GitHub".into()),
                email: None,
                hireable: Some(true),
                html_url: "https://github.com/octocat".into(),
                location: Some("San Francisco".into()),
                public_repos: 8,
            },
            repositories: vec![],
            languages: vec![("Rust".into(), 12000)],
        };
        let text = format_user_details(&details);
        assert!(text.contains("# octocat (The Octocat)"));
        assert!(text.contains("likes git"));
        assert!(text.contains("Company: GitHub"));
        assert!(text.contains("Hireable: yes"));
        assert!(text.contains("Rust: 12000 bytes"));
    }

    #[test]
    fn format_languages_lists_names() {
        let text = format_languages(&["Python".into(), "Rust".into()]);
        assert!(text.contains("2 known languages"));
        assert!(text.contains("- Rust"));
    }

    #[test]
    fn format_professions_shows_parsed_skills() {
        let professions = vec![Profession {
            name: "Backend".into(),
            skills: "Python, Django".into(),
        }];
        let text = format_professions(&professions);
        assert!(text.contains("- Backend: python, django"));
    }
}
