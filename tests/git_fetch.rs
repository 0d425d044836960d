// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

//! Fetch tests against throwaway repositories created with the `git` CLI.
//!
//! Skipped when `git` is not on PATH.

mod helpers;

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use comigoji_changelog::app::build_changelog;
use comigoji_changelog::config::{Config, QueryDefaults, RepoRequest};
use comigoji_changelog::domain::Pattern;
use comigoji_changelog::error::Error;
use comigoji_changelog::services::git::fetch_all;
use comigoji_changelog::services::renderer::Renderer;

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

/// Repository on branch `develop` with one empty commit per message
fn make_repo(messages: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q", "-b", "develop"]);
    for msg in messages {
        git(dir.path(), &["commit", "-q", "--allow-empty", "-m", msg]);
    }
    dir
}

#[tokio::test]
async fn fetches_subject_and_body_newest_first() {
    if !git_available() {
        return;
    }
    let repo = make_repo(&[":bug: fix off-by-one\n\nLoop bound was wrong.", ":sparkles: add widget"]);

    let fetched = fetch_all(&QueryDefaults::default(), &[RepoRequest::new(repo.path())])
        .await
        .unwrap();
    let commits = &fetched[0];
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].subject, ":sparkles: add widget");
    assert!(commits[0].body.is_none());
    assert_eq!(commits[1].subject, ":bug: fix off-by-one");
    assert_eq!(commits[1].body.as_deref().map(str::trim), Some("Loop bound was wrong."));
}

#[tokio::test]
async fn number_limits_history() {
    if !git_available() {
        return;
    }
    let repo = make_repo(&["one", "two", "three"]);
    let mut request = RepoRequest::new(repo.path());
    request.number = Some(2);

    let fetched = fetch_all(&QueryDefaults::default(), &[request]).await.unwrap();
    assert_eq!(fetched[0].len(), 2);
}

#[tokio::test]
async fn missing_branch_aborts_everything() {
    if !git_available() {
        return;
    }
    let good = make_repo(&["fine"]);
    let bad = make_repo(&["also fine"]);
    let mut bad_request = RepoRequest::new(bad.path());
    bad_request.branch = Some("release".into());

    let err = fetch_all(
        &QueryDefaults::default(),
        &[RepoRequest::new(good.path()), bad_request],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::BranchNotFound { branch, .. } if branch == "release"));
}

#[tokio::test]
async fn subdirectory_of_a_repository_is_accepted() {
    if !git_available() {
        return;
    }
    let repo = make_repo(&[":bug: fix in package"]);
    let pkg = repo.path().join("pkg");
    std::fs::create_dir(&pkg).unwrap();

    let fetched = fetch_all(&QueryDefaults::default(), &[RepoRequest::new(&pkg)])
        .await
        .unwrap();
    assert_eq!(fetched[0].len(), 1);
    assert_eq!(fetched[0][0].subject, ":bug: fix in package");
}

#[tokio::test]
async fn non_repository_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = fetch_all(&QueryDefaults::default(), &[RepoRequest::new(dir.path())])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotAGitRepo { .. }));
}

#[tokio::test]
async fn output_ceiling_is_enforced() {
    if !git_available() {
        return;
    }
    let repo = make_repo(&[":bug: a subject longer than the tiny buffer"]);
    let mut request = RepoRequest::new(repo.path());
    request.max_buffer = Some(8);

    let err = fetch_all(&QueryDefaults::default(), &[request]).await.unwrap_err();
    assert!(matches!(err, Error::OutputTooLarge { limit: 8, .. }));
}

#[tokio::test]
async fn two_repositories_end_to_end() {
    if !git_available() {
        return;
    }
    let app = make_repo(&[":bug: fix crash", ":construction: half done", "bump deps"]);
    let widgets = make_repo(&["WIP: add widget"]);

    let mut forced = RepoRequest::new(widgets.path());
    forced.force_category = Some("feature".into());
    forced.force_category_strip = Some(Pattern::prefix("WIP: "));

    let config = Config {
        repos: vec![RepoRequest::new(app.path()), forced],
        ..Config::default()
    };
    config.validate().unwrap();
    let categories = config.categories();

    let sorted = build_changelog(&config, &categories).await.unwrap();
    let out = Renderer::new(helpers::fixed_date())
        .render_to_string(&sorted, &categories)
        .unwrap();

    assert_eq!(
        out,
        "*Sun Oct 18 2026*\n\n\
         ### ✨ New Features\n\n* add widget\n\n\
         ### 🐛 Bug Fixes\n\n* fix crash\n\n\
         ### 👽 Misc\n\n* bump deps\n\n"
    );
}
