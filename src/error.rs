// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("You must provide a path for a comigojiChangelog.toml or comigojiChangelog.json file.")]
    #[diagnostic(
        code(comigoji::cli::missing_config),
        help("Run: comigoji-changelog <config-path>  (use - to read the config from stdin)")
    )]
    MissingConfigPath,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(comigoji::config::error))]
    Config(String),

    #[error("Invalid categories: {0}")]
    #[diagnostic(
        code(comigoji::config::categories_shape),
        help("Declare categories as an ordered list: [[categories]] entries (or a JSON array) with a `name` field")
    )]
    CategoriesNotAList(String),

    #[error("Unknown category '{category}'")]
    #[diagnostic(
        code(comigoji::config::unknown_category),
        help("Declare the category under [[categories]] or fix the force_category value")
    )]
    UnknownCategory { category: String },

    #[error("Not a git repository: {}", path.display())]
    #[diagnostic(
        code(comigoji::git::not_repo),
        help("Check the `path` of this entry in [[repos]]")
    )]
    NotAGitRepo { path: PathBuf },

    #[error("Branch '{branch}' not found in {}", path.display())]
    #[diagnostic(
        code(comigoji::git::branch_not_found),
        help("Set `branch` for this repository or change [defaults].branch")
    )]
    BranchNotFound { path: PathBuf, branch: String },

    #[error("git log failed in {}: {message}", path.display())]
    #[diagnostic(code(comigoji::git::error))]
    Git { path: PathBuf, message: String },

    #[error("git log output for {} exceeds {limit} bytes", path.display())]
    #[diagnostic(
        code(comigoji::git::output_too_large),
        help("Raise `max_buffer` or lower `number` for this repository")
    )]
    OutputTooLarge { path: PathBuf, limit: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
