// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Validation and display formatting for the Brazilian CPF taxpayer id.
//!
//! A CPF is 11 digits; the last two are check digits, each a weighted
//! modulo-11 sum over the digits before it.

fn digits(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Expected check digit for `prefix`, weighted `start_weight` down to 2.
fn check_digit(prefix: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (start_weight - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

/// Structural check of a CPF. Punctuation is ignored; anything that is not
/// exactly 11 digits, or is a single digit repeated, is invalid.
pub fn validate(raw: &str) -> bool {
    let d = digits(raw);
    if d.len() != 11 {
        return false;
    }
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }
    check_digit(&d[..9], 10) == d[9] && check_digit(&d[..10], 11) == d[10]
}

/// Best-effort `DDD.DDD.DDD-DD` mask. Partial input comes back as its bare
/// digits, so the caller can format on every keystroke; digits past the
/// eleventh are ignored.
pub fn format(raw: &str) -> String {
    let d: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(11)
        .collect();
    if d.len() < 11 {
        return d.into_iter().collect();
    }
    format!(
        "{}.{}.{}-{}",
        d[..3].iter().collect::<String>(),
        d[3..6].iter().collect::<String>(),
        d[6..9].iter().collect::<String>(),
        d[9..].iter().collect::<String>()
    )
}
