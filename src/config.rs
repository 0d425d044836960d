// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use figment::Figment;
use figment::error::Kind;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tracing::warn;

use crate::domain::{Categories, CategoryDef, Pattern};
use crate::error::{Error, Result};

/// `git log` parameters shared by every repository unless overridden
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Maximum number of commits per repository (default 100500)
    #[serde(default = "default_number")]
    pub number: usize,

    /// Ceiling on `git log` stdout in bytes (default 1000 KiB)
    #[serde(default = "default_max_buffer")]
    pub max_buffer: usize,
}

fn default_branch() -> String {
    "develop".into()
}
fn default_number() -> usize {
    100_500
}
fn default_max_buffer() -> usize {
    1000 * 1024
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            number: default_number(),
            max_buffer: default_max_buffer(),
        }
    }
}

/// One repository to read history from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRequest {
    #[serde(alias = "repo")]
    pub path: PathBuf,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub number: Option<usize>,

    #[serde(default)]
    pub since: Option<String>,

    #[serde(default)]
    pub until: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, alias = "maxBuffer")]
    pub max_buffer: Option<usize>,

    /// Every commit of this repository lands in this category
    #[serde(default, alias = "forceCategory")]
    pub force_category: Option<String>,

    /// Removed from subjects of forced commits
    #[serde(default, alias = "forceCategoryStrip")]
    pub force_category_strip: Option<Pattern>,
}

impl RepoRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            branch: None,
            number: None,
            since: None,
            until: None,
            author: None,
            max_buffer: None,
            force_category: None,
            force_category_strip: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: QueryDefaults,

    #[serde(default)]
    pub repos: Vec<RepoRequest>,

    /// Replaces the built-in categories when present
    #[serde(default)]
    pub categories: Option<Vec<CategoryDef>>,
}

impl Config {
    /// Load with priority: ENV > config file > defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if is_json_path(path) {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Toml::file(path))
        };

        Self::extract(figment)
    }

    /// Parse config text; JSON when it looks like a JSON object, TOML otherwise.
    pub fn from_text(text: &str) -> Result<Self> {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if text.trim_start().starts_with('{') {
            figment.merge(Json::string(text))
        } else {
            figment.merge(Toml::string(text))
        };

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        // Environment variables (COMIGOJI_DEFAULTS__BRANCH, etc.)
        figment
            .merge(Env::prefixed("COMIGOJI_").split("__"))
            .extract()
            .map_err(|e| {
                let categories_shape = e.path.iter().any(|key| key == "categories")
                    && matches!(e.kind, Kind::InvalidType(..));
                if categories_shape {
                    Error::CategoriesNotAList(e.to_string())
                } else {
                    Error::Config(e.to_string())
                }
            })
    }

    /// The category set in effect: user categories or the built-in set.
    pub fn categories(&self) -> Categories {
        match &self.categories {
            Some(defs) => Categories::new(defs.clone()),
            None => Categories::builtin(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.defaults.number == 0 {
            return Err(Error::Config("defaults.number must be at least 1".into()));
        }
        if self.defaults.branch.trim().is_empty() {
            return Err(Error::Config("defaults.branch cannot be empty".into()));
        }
        if self.repos.is_empty() {
            warn!("no repositories configured; the changelog will be empty");
        }

        let categories = self.categories();

        let mut seen = Vec::with_capacity(categories.len());
        for cat in categories.iter() {
            if seen.contains(&cat.name.as_str()) {
                return Err(Error::Config(format!(
                    "category '{}' is declared more than once",
                    cat.name
                )));
            }
            seen.push(cat.name.as_str());
        }

        if categories.iter().filter(|c| c.default).count() > 1 {
            return Err(Error::Config(
                "only one category can be marked default".into(),
            ));
        }

        for repo in &self.repos {
            if repo.number == Some(0) {
                return Err(Error::Config(format!(
                    "number must be at least 1 for {}",
                    repo.path.display()
                )));
            }
            match &repo.force_category {
                Some(name) if categories.get(name).is_none() => {
                    return Err(Error::UnknownCategory {
                        category: name.clone(),
                    });
                }
                None if repo.force_category_strip.is_some() => {
                    warn!(
                        repo = %repo.path.display(),
                        "force_category_strip has no effect without force_category"
                    );
                }
                _ => {}
            }
        }

        let default_name = &categories.default_category().name;
        for cat in categories.iter() {
            if cat.pattern.is_some() || &cat.name == default_name {
                continue;
            }
            let forced = self
                .repos
                .iter()
                .any(|r| r.force_category.as_deref() == Some(cat.name.as_str()));
            if !forced {
                return Err(Error::Config(format!(
                    "category '{}' has no pattern and no repository forces commits into it",
                    cat.name
                )));
            }
        }

        Ok(())
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

pub type PendingConfig = Pin<Box<dyn Future<Output = Result<Config>> + Send>>;

/// Where the config comes from: available now, or produced asynchronously.
pub enum RequestSource {
    Ready(Config),
    Deferred(PendingConfig),
}

impl RequestSource {
    /// A path of `-` reads the config from stdin; anything else is a file
    /// resolved against the working directory.
    pub fn from_arg(arg: &Path) -> Result<Self> {
        if arg == Path::new("-") {
            return Ok(Self::Deferred(Box::pin(async {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Config::from_text(&text)
            })));
        }

        let path = std::env::current_dir()?.join(arg);
        Config::load(&path).map(Self::Ready)
    }

    pub async fn resolve(self) -> Result<Config> {
        match self {
            Self::Ready(config) => Ok(config),
            Self::Deferred(pending) => pending.await,
        }
    }
}

impl std::fmt::Debug for RequestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(config) => f.debug_tuple("Ready").field(config).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
