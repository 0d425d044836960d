// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// A commit as read from `git log`, restricted to subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub subject: String,
    pub body: Option<String>,
    /// Set by the injector for forced categories, or by the classifier
    pub category: Option<String>,
}

impl Commit {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: None,
            category: None,
        }
    }

    /// Whitespace-only bodies are treated as absent.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        self
    }

    pub fn in_category(self, category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..self
        }
    }

    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..self
        }
    }
}
