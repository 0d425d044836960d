// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod classifier;
pub mod git;
pub mod injector;
pub mod renderer;
pub mod sorter;
