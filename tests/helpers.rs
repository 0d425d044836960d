// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use chrono::NaiveDate;

use comigoji_changelog::config::RepoRequest;
use comigoji_changelog::domain::{Categories, Commit};
use comigoji_changelog::services::{classifier, injector, renderer::Renderer, sorter};

/// Fixed header date so rendered output is stable
#[allow(dead_code)]
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Run the post-fetch pipeline over already fetched repositories
#[allow(dead_code)]
pub fn render_repos(fetched: Vec<(RepoRequest, Vec<Commit>)>, categories: &Categories) -> String {
    let commits: Vec<Commit> = fetched
        .into_iter()
        .flat_map(|(repo, commits)| injector::inject(commits, &repo))
        .collect();
    let sorted = sorter::sort(classifier::classify(commits, categories).unwrap());
    Renderer::new(fixed_date()).render_to_string(&sorted, categories).unwrap()
}

/// Single repository without forced category
#[allow(dead_code)]
pub fn render_commits(commits: Vec<Commit>, categories: &Categories) -> String {
    render_repos(vec![(RepoRequest::new("."), commits)], categories)
}
