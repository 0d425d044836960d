// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "comigoji-changelog")]
#[command(version)]
#[command(about = "Markdown changelog from gitmoji-prefixed commits", long_about = None)]
pub struct Cli {
    /// Config file (TOML or JSON), or - to read it from stdin
    pub config: Option<PathBuf>,

    /// Date printed in the header (YYYY-MM-DD, default: today)
    #[arg(long, env = "COMIGOJI_DATE")]
    pub date: Option<NaiveDate>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
