// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::Pattern;

/// Name of the fallback bucket when no category is marked `default`.
pub const DEFAULT_CATEGORY: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,

    #[serde(default)]
    pub pattern: Option<Pattern>,

    /// Markdown heading; the name is used when absent
    #[serde(default)]
    pub header: Option<String>,

    /// Collect matches but leave them out of the output
    #[serde(default)]
    pub skip: bool,

    /// Marks the bucket for commits no pattern matched
    #[serde(default)]
    pub default: bool,
}

impl CategoryDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            header: None,
            skip: false,
            default: false,
        }
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn heading(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.name)
    }
}

/// Category definitions in declaration order.
///
/// Declaration order is both the matching priority and the rendering order.
#[derive(Debug, Clone)]
pub struct Categories {
    defs: Vec<CategoryDef>,
}

impl Categories {
    /// Wraps user definitions, appending a skip-only `default` bucket when
    /// none of them is the default.
    pub fn new(defs: Vec<CategoryDef>) -> Self {
        let mut categories = Self { defs };
        if categories.default_index().is_none() {
            categories
                .defs
                .push(CategoryDef::new(DEFAULT_CATEGORY).skipped());
        }
        categories
    }

    /// The built-in gitmoji category set.
    pub fn builtin() -> Self {
        let regex = |expr: &str| match Pattern::regex(expr) {
            Ok(p) => p,
            Err(e) => unreachable!("built-in pattern {expr} is invalid: {e}"),
        };

        Self::new(vec![
            CategoryDef::new("rollback")
                .with_pattern(regex(r"^:(roller_coaster|rewind):"))
                .with_header("### 🎢 Rollbacked"),
            CategoryDef::new("feature")
                .with_pattern(regex(r"^:(rainbow|sparkles):"))
                .with_header("### ✨ New Features"),
            CategoryDef::new("improvement")
                .with_pattern(regex(r"^:(zap|wrench):"))
                .with_header("### ⚡️ General Improvements"),
            CategoryDef::new("bug")
                .with_pattern(regex(r"^:bug:"))
                .with_header("### 🐛 Bug Fixes"),
            CategoryDef::new("assets")
                .with_pattern(regex(r"^:(briefcase|bento):"))
                .with_header("### 🍱 Demos and Stuff"),
            CategoryDef::new("docs")
                .with_pattern(regex(r"^:(books|pencil|pencil2|memo):"))
                .with_header("### 📝 Docs"),
            CategoryDef::new(DEFAULT_CATEGORY).with_header("### 👽 Misc"),
            CategoryDef::new("ignore")
                .with_pattern(regex(r"^:(construction|doughnut|rocket|bookmark):"))
                .skipped(),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryDef> {
        self.defs.iter().find(|c| c.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.defs.iter().position(|c| c.name == name)
    }

    /// Index of the fallback bucket: an explicit `default = true` marker wins
    /// over the `default` name.
    pub fn default_index(&self) -> Option<usize> {
        self.defs
            .iter()
            .position(|c| c.default)
            .or_else(|| self.index_of(DEFAULT_CATEGORY))
    }

    pub fn default_category(&self) -> &CategoryDef {
        // new() guarantees a default bucket exists
        let idx = self.default_index().unwrap_or(self.defs.len() - 1);
        &self.defs[idx]
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::builtin()
    }
}
