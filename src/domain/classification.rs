// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use super::{Categories, Commit};

/// One bucket per declared category, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    buckets: Vec<(String, Vec<Commit>)>,
}

impl Classification {
    /// Empty buckets for every category.
    pub fn empty(categories: &Categories) -> Self {
        Self {
            buckets: categories
                .iter()
                .map(|c| (c.name.clone(), Vec::new()))
                .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[Commit]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, commits)| commits.as_slice())
    }

    pub fn bucket_mut(&mut self, category: &str) -> Option<&mut Vec<Commit>> {
        self.buckets
            .iter_mut()
            .find(|(name, _)| name == category)
            .map(|(_, commits)| commits)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Commit])> {
        self.buckets
            .iter()
            .map(|(name, commits)| (name.as_str(), commits.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, commits)| commits.len()).sum()
    }

    /// Apply `f` to every bucket, keeping category order.
    pub fn map_buckets(self, mut f: impl FnMut(Vec<Commit>) -> Vec<Commit>) -> Self {
        Self {
            buckets: self
                .buckets
                .into_iter()
                .map(|(name, commits)| (name, f(commits)))
                .collect(),
        }
    }
}
