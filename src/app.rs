// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::Write;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, RequestSource};
use crate::domain::{Categories, Classification, Commit};
use crate::error::{Error, Result};
use crate::services::{classifier, git, injector, renderer::Renderer, sorter};

pub struct App {
    cli: Cli,
    source: RequestSource,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let Some(ref arg) = cli.config else {
            return Err(Error::MissingConfigPath);
        };
        let source = RequestSource::from_arg(arg)?;
        Ok(Self { cli, source })
    }

    pub async fn run(self) -> Result<()> {
        let config = self.source.resolve().await?;
        config.validate()?;
        debug!(
            repos = config.repos.len(),
            branch = %config.defaults.branch,
            custom_categories = config.categories.is_some(),
            "config loaded"
        );

        let categories = config.categories();
        let sorted = build_changelog(&config, &categories).await?;

        let renderer = match self.cli.date {
            Some(date) => Renderer::new(date),
            None => Renderer::today(),
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        renderer.render(&mut out, &sorted, &categories)?;
        out.flush()?;
        Ok(())
    }
}

/// Fetch, inject, classify and sort commits from every configured repository.
pub async fn build_changelog(config: &Config, categories: &Categories) -> Result<Classification> {
    let fetched = git::fetch_all(&config.defaults, &config.repos).await?;

    let commits: Vec<Commit> = fetched
        .into_iter()
        .zip(&config.repos)
        .flat_map(|(commits, repo)| injector::inject(commits, repo))
        .collect();
    debug!(count = commits.len(), "commits collected");

    let classification = classifier::classify(commits, categories)?;
    debug!(kept = classification.total(), "commits classified");

    Ok(sorter::sort(classification))
}
