// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use crate::config::RepoRequest;
use crate::domain::Commit;

/// Stamp commits of a repository with its forced category, if any.
///
/// The strip pattern loses its first occurrence in each subject; no trimming
/// happens here. Without a forced category the commits pass through as-is.
pub fn inject(commits: Vec<Commit>, repo: &RepoRequest) -> Vec<Commit> {
    let Some(ref category) = repo.force_category else {
        return commits;
    };

    commits
        .into_iter()
        .map(|commit| {
            let subject = match repo.force_category_strip {
                Some(ref strip) => strip.strip(&commit.subject).into_owned(),
                None => commit.subject.clone(),
            };
            commit.with_subject(subject).in_category(category.as_str())
        })
        .collect()
}
