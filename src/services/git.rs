// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::debug;

use crate::config::{QueryDefaults, RepoRequest};
use crate::domain::Commit;
use crate::error::{Error, Result};

// ASCII record/unit separators never appear in subjects or bodies
const RECORD_SEP: char = '\u{1e}';
const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%x1e%s%x1f%b";

/// A fully resolved `git log` invocation for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub path: PathBuf,
    pub branch: String,
    pub number: usize,
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    pub max_buffer: usize,
}

impl LogQuery {
    /// Per-repository overrides take precedence over the defaults.
    pub fn resolve(defaults: &QueryDefaults, repo: &RepoRequest) -> Self {
        Self {
            path: repo.path.clone(),
            branch: repo
                .branch
                .clone()
                .unwrap_or_else(|| defaults.branch.clone()),
            number: repo.number.unwrap_or(defaults.number),
            since: repo.since.clone(),
            until: repo.until.clone(),
            author: repo.author.clone(),
            max_buffer: repo.max_buffer.unwrap_or(defaults.max_buffer),
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            self.branch.clone(),
            "-n".to_string(),
            self.number.to_string(),
            "--no-color".to_string(),
            LOG_FORMAT.to_string(),
        ];
        if let Some(ref since) = self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(ref until) = self.until {
            args.push(format!("--until={until}"));
        }
        if let Some(ref author) = self.author {
            args.push(format!("--author={author}"));
        }
        args.push("--".to_string());
        args
    }
}

pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    /// Find the repository containing `path` and check that `branch` resolves.
    ///
    /// `path` may point below the work tree root, as `git -C` allows.
    pub fn open(path: &Path, branch: &str) -> Result<Self> {
        let repo = gix::discover(path).map_err(|_| Error::NotAGitRepo {
            path: path.to_path_buf(),
        })?;

        repo.rev_parse_single(branch)
            .map_err(|_| Error::BranchNotFound {
                path: path.to_path_buf(),
                branch: branch.to_string(),
            })?;

        Ok(Self {
            work_dir: path.to_path_buf(),
        })
    }

    pub async fn log(&self, query: &LogQuery) -> Result<Vec<Commit>> {
        let output = tokio::process::Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .args(query.args())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git {
                path: self.work_dir.clone(),
                message: stderr.trim().to_string(),
            });
        }

        if output.stdout.len() > query.max_buffer {
            return Err(Error::OutputTooLarge {
                path: self.work_dir.clone(),
                limit: query.max_buffer,
            });
        }

        Ok(parse_log(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split `git log` output produced with the separator format into commits.
pub fn parse_log(raw: &str) -> Vec<Commit> {
    raw.split(RECORD_SEP)
        .filter(|record| !record.trim().is_empty())
        .map(|record| {
            let (subject, body) = record.split_once(FIELD_SEP).unwrap_or((record, ""));
            Commit::new(subject.trim_end_matches(['\r', '\n'])).with_body(body)
        })
        .collect()
}

/// Fetch one repository.
pub async fn fetch_repo(defaults: &QueryDefaults, repo: &RepoRequest) -> Result<Vec<Commit>> {
    let query = LogQuery::resolve(defaults, repo);
    let git = GitService::open(&query.path, &query.branch)?;
    let commits = git.log(&query).await?;

    debug!(
        repo = %query.path.display(),
        branch = %query.branch,
        count = commits.len(),
        "history fetched"
    );

    Ok(commits)
}

/// Fetch every repository concurrently, keeping config order. The first
/// failure aborts the whole batch.
pub async fn fetch_all(
    defaults: &QueryDefaults,
    repos: &[RepoRequest],
) -> Result<Vec<Vec<Commit>>> {
    try_join_all(repos.iter().map(|repo| fetch_repo(defaults, repo))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_splits_subject_and_body() {
        let raw = "\u{1e}:bug: fix off-by-one\u{1f}details here\nmore\n\n\u{1e}:sparkles: add x\u{1f}\n";
        let commits = parse_log(raw);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, ":bug: fix off-by-one");
        assert_eq!(commits[0].body.as_deref(), Some("details here\nmore\n\n"));
        assert_eq!(commits[1].subject, ":sparkles: add x");
        assert!(commits[1].body.is_none());
    }

    #[test]
    fn parse_log_empty_output() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn query_overrides_defaults() {
        let defaults = QueryDefaults::default();
        let mut repo = RepoRequest::new("../app");
        repo.branch = Some("main".into());
        repo.since = Some("2 weeks ago".into());

        let q = LogQuery::resolve(&defaults, &repo);
        assert_eq!(q.branch, "main");
        assert_eq!(q.number, 100_500);
        assert_eq!(q.max_buffer, 1_024_000);

        let args = q.args();
        assert_eq!(&args[..4], ["log", "main", "-n", "100500"]);
        assert!(args.contains(&"--since=2 weeks ago".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--"));
    }

    #[test]
    fn query_uses_defaults_without_overrides() {
        let q = LogQuery::resolve(&QueryDefaults::default(), &RepoRequest::new("."));
        assert_eq!(q.branch, "develop");
        assert!(q.since.is_none());
    }
}
