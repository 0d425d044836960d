// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::cmp::Ordering;

use crate::domain::Classification;

/// Sort every bucket by subject. The sort is stable, so identical subjects
/// keep their classification order.
pub fn sort(classification: Classification) -> Classification {
    classification.map_buckets(|mut commits| {
        commits.sort_by(|a, b| collate(&a.subject, &b.subject));
        commits
    })
}

/// Locale-style string ordering.
///
/// Primary level compares character classes (whitespace, punctuation and
/// symbols, digits, letters) and case-folded characters with Latin-1 and
/// Latin Extended-A diacritics removed. Ties are broken by accents (plain
/// letter first), then by case with lowercase first, then by code point.
/// Letters outside those blocks keep their own primary weight.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| a.chars().map(accent_weight).cmp(b.chars().map(accent_weight)))
        .then_with(|| a.chars().map(case_weight).cmp(b.chars().map(case_weight)))
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    };
    (class, base_letter(lowercase(c)))
}

fn accent_weight(c: char) -> char {
    let lower = lowercase(c);
    if base_letter(lower) == lower {
        '\0'
    } else {
        lower
    }
}

fn case_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Strip the diacritic from a lowercase Latin letter.
fn base_letter(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => c,
    }
}
