// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use tracing::debug;

use crate::domain::{Categories, Classification, Commit};
use crate::error::{Error, Result};

/// Partition commits into category buckets.
///
/// Commits with a preset category go straight to that bucket. The rest are
/// tested against category patterns in declaration order; the first match
/// wins and loses the matched text from its subject. Unmatched commits land in
/// the default bucket. Duplicates are dropped per bucket.
pub fn classify(commits: Vec<Commit>, categories: &Categories) -> Result<Classification> {
    let mut sorted = Classification::empty(categories);
    let default_name = categories.default_category().name.clone();

    for commit in commits {
        if let Some(category) = commit.category.clone() {
            let bucket = sorted
                .bucket_mut(&category)
                .ok_or_else(|| Error::UnknownCategory {
                    category: category.clone(),
                })?;
            if bucket.iter().any(|c| c.subject == commit.subject) {
                debug!(category = %category, subject = %commit.subject, "duplicate dropped");
            } else {
                bucket.push(commit);
            }
            continue;
        }

        let matched = categories.iter().find_map(|cat| {
            cat.pattern
                .as_ref()
                .filter(|p| p.is_match(&commit.subject))
                .map(|p| (cat.name.as_str(), p))
        });

        match matched {
            Some((name, pattern)) => {
                let subject = pattern.strip(&commit.subject).trim().to_string();
                let Some(bucket) = sorted.bucket_mut(name) else {
                    continue;
                };
                if bucket.iter().any(|c| c.subject.trim() == subject) {
                    debug!(category = name, subject = %subject, "duplicate dropped");
                    continue;
                }
                bucket.push(commit.with_subject(subject).in_category(name));
            }
            None => {
                let Some(bucket) = sorted.bucket_mut(&default_name) else {
                    continue;
                };
                if bucket.iter().any(|c| c.subject == commit.subject) {
                    debug!(category = %default_name, subject = %commit.subject, "duplicate dropped");
                    continue;
                }
                bucket.push(commit.in_category(default_name.as_str()));
            }
        }
    }

    Ok(sorted)
}
