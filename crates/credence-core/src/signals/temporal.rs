// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Temporal Signal
// ─────────────────────────────────────────────────────────────────────
//! Breaking news is unverified by default, not false. Old years in a
//! claim suggest a recycled story.

use credence_types::{Flag, SignalScore};

use super::ClaimText;
use crate::patterns::PatternLibrary;

pub const DEFAULT: f64 = 0.75;
pub const BREAKING: f64 = 0.45;
const RECYCLED_PENALTY: f64 = 0.15;
/// A year is stale once it is more than this many years in the past.
const RECYCLED_AGE: i32 = 2;

pub fn score(claim: &ClaimText<'_>, patterns: &PatternLibrary, current_year: i32) -> SignalScore {
    let mut value = DEFAULT;
    let mut flags = Vec::new();
    let text = claim.lower();

    if patterns.is_breaking(text) {
        value = BREAKING;
        flags.push(Flag::BreakingNewsUnverified);
    }

    for year in patterns.years_2010s(text) {
        if year < current_year - RECYCLED_AGE {
            value -= RECYCLED_PENALTY;
            flags.push(Flag::PotentiallyRecycledNews { year });
        }
    }

    SignalScore::new(f64::max(0.0, value), flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, year: i32) -> SignalScore {
        score(&ClaimText::new(text), &PatternLibrary::standard().unwrap(), year)
    }

    #[test]
    fn test_default() {
        let s = run("New metro line opens in Pune", 2026);
        assert_eq!(s.value, DEFAULT);
        assert!(s.flags.is_empty());
    }

    #[test]
    fn test_breaking() {
        let s = run("BREAKING: bridge collapse reported", 2026);
        assert_eq!(s.value, BREAKING);
        assert_eq!(s.flags, vec![Flag::BreakingNewsUnverified]);
    }

    #[test]
    fn test_recycled_years_cumulative() {
        let s = run("Photos from 2013 floods and 2016 cyclone resurface", 2026);
        assert!((s.value - 0.45).abs() < 1e-9);
        assert_eq!(
            s.flags,
            vec![
                Flag::PotentiallyRecycledNews { year: 2013 },
                Flag::PotentiallyRecycledNews { year: 2016 }
            ]
        );
    }

    #[test]
    fn test_recent_year_not_recycled() {
        // 2019 is not older than 2021 - 2
        let s = run("Report from 2019", 2021);
        assert_eq!(s.value, DEFAULT);
        let s = run("Report from 2018", 2021);
        assert!(s.has(&Flag::PotentiallyRecycledNews { year: 2018 }));
    }

    #[test]
    fn test_floor_at_zero() {
        let s = run("Live: 2010 2011 2012 2013 footage", 2026);
        assert_eq!(s.value, 0.0);
        assert_eq!(s.flags.len(), 5);
    }
}
