// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod category;
mod classification;
mod commit;
mod pattern;

pub use category::*;
pub use classification::*;
pub use commit::*;
pub use pattern::*;
