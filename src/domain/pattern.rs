// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Subject matcher used by categories and strip rules.
///
/// A plain string in the config is a literal prefix, a `{ regex = "..." }`
/// table is a regular expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub enum Pattern {
    Prefix(String),
    Regex(Regex),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Prefix(String),
    Regex { regex: String },
}

impl TryFrom<RawPattern> for Pattern {
    type Error = regex::Error;

    fn try_from(raw: RawPattern) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawPattern::Prefix(prefix) => Ok(Self::Prefix(prefix)),
            RawPattern::Regex { regex } => Regex::new(&regex).map(Self::Regex),
        }
    }
}

impl From<Pattern> for RawPattern {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Prefix(prefix) => Self::Prefix(prefix),
            Pattern::Regex(re) => Self::Regex {
                regex: re.as_str().to_string(),
            },
        }
    }
}

impl Pattern {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    pub fn regex(expr: &str) -> std::result::Result<Self, regex::Error> {
        Regex::new(expr).map(Self::Regex)
    }

    pub fn is_match(&self, subject: &str) -> bool {
        match self {
            Self::Prefix(prefix) => subject.starts_with(prefix.as_str()),
            Self::Regex(re) => re.is_match(subject),
        }
    }

    /// Remove the first occurrence of the pattern, leaving the rest untouched.
    pub fn strip<'a>(&self, subject: &'a str) -> Cow<'a, str> {
        match self {
            Self::Prefix(prefix) if prefix.is_empty() => Cow::Borrowed(subject),
            Self::Prefix(prefix) => match subject.find(prefix.as_str()) {
                Some(at) => {
                    Cow::Owned(format!("{}{}", &subject[..at], &subject[at + prefix.len()..]))
                }
                None => Cow::Borrowed(subject),
            },
            Self::Regex(re) => re.replacen(subject, 1, ""),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix(prefix) => write!(f, "{:?}", prefix),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}
