// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Pattern Library
// ─────────────────────────────────────────────────────────────────────
//! Compiled detectors for manipulation language and numeric anomalies.
//!
//! All detectors run against lower-cased claim text. Each category is a
//! list of independent regexes; a category's hit count is the number of
//! distinct regexes that match at least once.

use regex::Regex;

use credence_types::{CredenceError, CredenceResult};

const CLICKBAIT: &[&str] = &[
    r"\bbreaking\b",
    r"\bshocking\b",
    r"\bviral\b",
    r"\bexclusive\b",
    r"\bsecret\b",
    r"\bhidden\b",
    r"\bthey don.t want you\b",
    r"\byou won.t believe\b",
    r"\bfree money\b",
    r"\binstant\b",
    r"\bguaranteed\b",
    r"100%\s*(free|cash|money)",
];

const URGENCY: &[&str] = &[
    r"(act now|limited time|expires today|last chance|hurry)",
    r"(claim (your|now|immediately))",
    r"(don.t miss|share immediately|forward to all)",
    r"\b(immediately|urgent(ly)?|right away|before it.s deleted)\b",
];

const SCHEME_IMPERSONATION: &[&str] = &[
    r"pm\s*(modi|cares|kisan|awas|ujjwala|jan dhan)",
    r"(pradhan mantri|sarkar|government|govt)\s+(is\s+)?(giving|offering|distributing|will give)",
    r"(aadhar|aadhaar|ration card|voter id)\s+(linked|required|mandatory)\s+(for|to get)",
    r"\b(giving|offering|distributing)\s+(₹|rs\.?|inr)\s*\d",
];

const UNIVERSAL_BENEFIT: &[&str] = &[
    r"(₹|\brs\.?|\binr)\s*[\d,.]+\s*(lakhs?|crores?)\b",
    r"\b(every|each)\s+(citizen|indian|person)\b",
    r"\b(free|subsidy)\s+of\s+(₹|rs\.?|inr)",
];

const BREAKING: &str = r"\b(breaking|just in|live|unfolding)\b";

/// Currency marker, amount with optional grouping commas and decimals,
/// optional lakh/crore multiplier.
const CURRENCY: &str = r"(?:₹|\brs\.?|\binr)\s*(\d[\d,]*(?:\.\d+)?)(?:\s*(lakhs?|crores?)\b)?";

const PERCENTAGE: &str = r"(\d+)\s*%";

const YEAR_2010S: &str = r"\b(201\d)\b";

fn compile(category: &str, pattern: &str) -> CredenceResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| CredenceError::Pattern(format!("{category} pattern '{pattern}': {e}")))
}

fn compile_all(category: &str, patterns: &[&str]) -> CredenceResult<Vec<Regex>> {
    patterns.iter().map(|p| compile(category, p)).collect()
}

fn distinct_hits(set: &[Regex], text: &str) -> usize {
    set.iter().filter(|re| re.is_match(text)).count()
}

/// Compiled detector set, built once and shared by every extractor.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    clickbait: Vec<Regex>,
    urgency: Vec<Regex>,
    scheme_impersonation: Vec<Regex>,
    universal_benefit: Vec<Regex>,
    breaking: Regex,
    currency: Regex,
    percentage: Regex,
    year: Regex,
}

impl PatternLibrary {
    pub fn standard() -> CredenceResult<Self> {
        Ok(Self {
            clickbait: compile_all("clickbait", CLICKBAIT)?,
            urgency: compile_all("urgency", URGENCY)?,
            scheme_impersonation: compile_all("scheme", SCHEME_IMPERSONATION)?,
            universal_benefit: compile_all("universal benefit", UNIVERSAL_BENEFIT)?,
            breaking: compile("breaking", BREAKING)?,
            currency: compile("currency", CURRENCY)?,
            percentage: compile("percentage", PERCENTAGE)?,
            year: compile("year", YEAR_2010S)?,
        })
    }

    pub fn clickbait_hits(&self, text: &str) -> usize {
        distinct_hits(&self.clickbait, text)
    }

    pub fn urgency_hits(&self, text: &str) -> usize {
        distinct_hits(&self.urgency, text)
    }

    pub fn scheme_hits(&self, text: &str) -> usize {
        distinct_hits(&self.scheme_impersonation, text)
    }

    pub fn has_universal_benefit(&self, text: &str) -> bool {
        self.universal_benefit.iter().any(|re| re.is_match(text))
    }

    pub fn is_breaking(&self, text: &str) -> bool {
        self.breaking.is_match(text)
    }

    /// Rupee amounts in order of appearance. Lakh and crore suffixes
    /// scale the figure; amounts too large for `u64` saturate.
    pub fn currency_amounts(&self, text: &str) -> Vec<u64> {
        self.currency
            .captures_iter(text)
            .filter_map(|caps| {
                let digits: String = caps.get(1)?.as_str().chars().filter(|c| *c != ',').collect();
                let base: f64 = digits.parse().ok()?;
                let multiplier = match caps.get(2).map(|m| m.as_str()) {
                    Some(unit) if unit.starts_with("lakh") => 1e5,
                    Some(unit) if unit.starts_with("crore") => 1e7,
                    _ => 1.0,
                };
                // `as` saturates on overflow.
                Some((base * multiplier) as u64)
            })
            .collect()
    }

    /// Integer percentages in order of appearance, saturating on overflow.
    pub fn percentages(&self, text: &str) -> Vec<u64> {
        self.percentage
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
            .collect()
    }

    /// Years 2010–2019 in order of appearance.
    pub fn years_2010s(&self, text: &str) -> Vec<i32> {
        self.year
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::standard().unwrap()
    }

    #[test]
    fn test_standard_compiles() {
        lib();
    }

    #[test]
    fn test_clickbait_counts_distinct_patterns() {
        let l = lib();
        assert_eq!(l.clickbait_hits("shocking shocking shocking"), 1);
        assert_eq!(l.clickbait_hits("shocking viral secret"), 3);
        assert_eq!(l.clickbait_hits("you won't believe this 100% free offer"), 2);
        assert_eq!(l.clickbait_hits("the budget was tabled today"), 0);
    }

    #[test]
    fn test_urgency() {
        let l = lib();
        assert_eq!(l.urgency_hits("forward to all before midnight"), 1);
        assert_eq!(l.urgency_hits("share immediately!"), 2);
        assert_eq!(l.urgency_hits("parliament adjourned"), 0);
    }

    #[test]
    fn test_scheme_impersonation() {
        let l = lib();
        assert_eq!(l.scheme_hits("pm kisan installment released"), 1);
        assert_eq!(l.scheme_hits("government giving ₹60,000 to all"), 2);
        assert_eq!(l.scheme_hits("aadhaar card renewed online"), 0);
        assert_eq!(l.scheme_hits("aadhaar mandatory to get pension"), 1);
    }

    #[test]
    fn test_universal_benefit() {
        let l = lib();
        assert!(l.has_universal_benefit("₹60,000 to every citizen"));
        assert!(l.has_universal_benefit("free subsidy of ₹ 2000"));
        assert!(l.has_universal_benefit("rs 5 lakh for farmers"));
        assert!(!l.has_universal_benefit("citizens queue for passports"));
    }

    #[test]
    fn test_breaking_word_bounded() {
        let l = lib();
        assert!(l.is_breaking("breaking: dam gates opened"));
        assert!(l.is_breaking("just in - flights delayed"));
        assert!(!l.is_breaking("a delivery of new buses"));
    }

    #[test]
    fn test_currency_amounts() {
        let l = lib();
        assert_eq!(l.currency_amounts("₹60,000 and rs. 1,00,000"), vec![60_000, 100_000]);
        assert_eq!(l.currency_amounts("inr 2.5 lakh"), vec![250_000]);
        assert_eq!(l.currency_amounts("₹3 crore"), vec![30_000_000]);
        assert_eq!(l.currency_amounts("₹, nothing here"), Vec::<u64>::new());
        assert_eq!(l.currency_amounts("five years later"), Vec::<u64>::new());
    }

    #[test]
    fn test_currency_saturates() {
        let l = lib();
        let huge = format!("₹{}", "9".repeat(40));
        assert_eq!(l.currency_amounts(&huge), vec![u64::MAX]);
    }

    #[test]
    fn test_percentages() {
        let l = lib();
        assert_eq!(l.percentages("95% effective, 12 % fee"), vec![95, 12]);
        let huge = format!("{}%", "9".repeat(30));
        assert_eq!(l.percentages(&huge), vec![u64::MAX]);
    }

    #[test]
    fn test_years() {
        let l = lib();
        assert_eq!(l.years_2010s("floods of 2013 and 2019, not 2009 or 2021"), vec![2013, 2019]);
        assert!(l.years_2010s("20150").is_empty());
    }
}
