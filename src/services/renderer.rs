// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::io::{self, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Categories, Classification, Commit};

/// Writes the Markdown changelog.
pub struct Renderer {
    date: NaiveDate,
}

impl Renderer {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Renderer dated with the local calendar day.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn render<W: Write>(
        &self,
        out: &mut W,
        classification: &Classification,
        categories: &Categories,
    ) -> io::Result<()> {
        // Long date form, e.g. "Sun Oct 18 2026"
        write!(out, "*{}*\n\n", self.date.format("%a %b %d %Y"))?;

        let mut sections = 0;
        for (name, commits) in classification.iter() {
            let Some(def) = categories.get(name) else {
                continue;
            };
            if def.skip || commits.is_empty() {
                continue;
            }

            write!(out, "{}\n\n", def.heading())?;
            for commit in commits {
                write_entry(out, commit)?;
            }
            writeln!(out)?;
            sections += 1;
        }

        debug!(sections, "changelog rendered");
        Ok(())
    }

    pub fn render_to_string(
        &self,
        classification: &Classification,
        categories: &Categories,
    ) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(&mut buf, classification, categories)?;
        String::from_utf8(buf).map_err(io::Error::other)
    }
}

fn write_entry<W: Write>(out: &mut W, commit: &Commit) -> io::Result<()> {
    write!(out, "* {}", commit.subject)?;
    if let Some(body) = commit.body.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        for line in body.lines() {
            write!(out, "\n  {line}")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier::classify;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 8).unwrap()
    }

    #[test]
    fn header_uses_long_date() {
        let cats = Categories::builtin();
        let out = Renderer::new(date())
            .render_to_string(&Classification::empty(&cats), &cats)
            .unwrap();
        assert_eq!(out, "*Thu Oct 08 2026*\n\n");
    }

    #[test]
    fn body_lines_are_indented() {
        let cats = Categories::builtin();
        let sorted = classify(
            vec![Commit::new(":bug: fix it").with_body("\n\nline one\n\nline two\n\n")],
            &cats,
        )
        .unwrap();
        let out = Renderer::new(date()).render_to_string(&sorted, &cats).unwrap();
        assert_eq!(
            out,
            "*Thu Oct 08 2026*\n\n### 🐛 Bug Fixes\n\n* fix it\n  line one\n  \n  line two\n\n"
        );
    }

    #[test]
    fn skipped_and_empty_categories_are_omitted() {
        let cats = Categories::builtin();
        let sorted = classify(vec![Commit::new(":rocket: release 1.0")], &cats).unwrap();
        let out = Renderer::new(date()).render_to_string(&sorted, &cats).unwrap();
        assert_eq!(out, "*Thu Oct 08 2026*\n\n");
    }
}
