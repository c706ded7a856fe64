// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Domain Registry
// ─────────────────────────────────────────────────────────────────────
//! Curated publisher trust tiers and government URL patterns.
//!
//! Built once at startup and shared by reference; nothing here mutates
//! after construction.

use std::collections::BTreeSet;

use regex::Regex;
use url::Url;

use credence_types::{CredenceError, CredenceResult, SourceTier};

/// Government portals, national papers of record and wire services.
pub const TIER_1_DOMAINS: &[&str] = &[
    // Government
    "pib.gov.in",
    "pmindia.gov.in",
    "egazette.nic.in",
    "mha.gov.in",
    "mohfw.gov.in",
    "education.gov.in",
    "rbi.org.in",
    "sebi.gov.in",
    "eci.gov.in",
    "uidai.gov.in",
    "finmin.nic.in",
    "rural.nic.in",
    // National media
    "thehindu.com",
    "indianexpress.com",
    "hindustantimes.com",
    "timesofindia.indiatimes.com",
    "economictimes.indiatimes.com",
    "business-standard.com",
    "livemint.com",
    // Wire services
    "reuters.com",
    "apnews.com",
    "afp.com",
    "bloomberg.com",
    "bbc.com",
    "pbs.org",
];

/// Established broadcasters and international outlets.
pub const TIER_2_DOMAINS: &[&str] = &[
    "ndtv.com",
    "indiatoday.in",
    "news18.com",
    "republicworld.com",
    "timesnownews.com",
    "ddnews.gov.in",
    "newsonair.gov.in",
    "cnn.com",
    "nytimes.com",
    "washingtonpost.com",
    "aljazeera.com",
    "dw.com",
    "abc.net.au",
];

/// Matched against the extracted domain, not the full URL.
pub const GOV_PATTERNS: &[&str] = &[r"\.gov\.in$", r"\.nic\.in$", r"uidai\.gov\.in"];

/// Immutable publisher-trust tables.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    tier1: BTreeSet<String>,
    tier2: BTreeSet<String>,
    gov_patterns: Vec<Regex>,
}

impl DomainRegistry {
    pub fn new<I, J, S, T>(tier1: I, tier2: J, gov_patterns: &[&str]) -> CredenceResult<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let gov_patterns = gov_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    CredenceError::Pattern(format!("government pattern '{p}': {e}"))
                })
            })
            .collect::<CredenceResult<Vec<_>>>()?;

        Ok(Self {
            tier1: tier1
                .into_iter()
                .map(|d| d.as_ref().to_lowercase())
                .collect(),
            tier2: tier2
                .into_iter()
                .map(|d| d.as_ref().to_lowercase())
                .collect(),
            gov_patterns,
        })
    }

    /// Registry with the built-in Indian and international tables.
    pub fn standard() -> CredenceResult<Self> {
        Self::new(TIER_1_DOMAINS, TIER_2_DOMAINS, GOV_PATTERNS)
    }

    /// Classify a bare domain. Tier-1 wins over Tier-2, which wins over a
    /// government pattern match.
    pub fn classify(&self, domain: &str) -> Option<SourceTier> {
        if self.tier1.contains(domain) {
            Some(SourceTier::Tier1)
        } else if self.tier2.contains(domain) {
            Some(SourceTier::Tier2)
        } else if self.gov_patterns.iter().any(|re| re.is_match(domain)) {
            Some(SourceTier::Government)
        } else {
            None
        }
    }

    /// Tier-1 domains in sorted order.
    pub fn tier1_domains(&self) -> impl Iterator<Item = &str> {
        self.tier1.iter().map(String::as_str)
    }

    /// Tier-1 domains mentioned anywhere in free text, sorted.
    pub fn tier1_mentions<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let lower = text.to_lowercase();
        self.tier1_domains().filter(|d| lower.contains(*d)).collect()
    }
}

/// Reduce a URL to its host: lower-cased, without scheme, `www.`, port,
/// path or query. Bare hosts (`thehindu.com/x`) are accepted.
pub fn extract_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains("://") {
        trimmed
    } else {
        format!("http://{trimmed}")
    };
    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DomainRegistry {
        DomainRegistry::standard().unwrap()
    }

    #[test]
    fn test_extract_domain_variants() {
        assert_eq!(
            extract_domain("https://www.TheHindu.com/news/national/article1.ece?x=1").as_deref(),
            Some("thehindu.com")
        );
        assert_eq!(
            extract_domain("reuters.com/world").as_deref(),
            Some("reuters.com")
        );
        assert_eq!(
            extract_domain("http://pib.gov.in:8080/PressRelease").as_deref(),
            Some("pib.gov.in")
        );
        assert_eq!(extract_domain("   "), None);
    }

    #[test]
    fn test_extract_domain_garbage() {
        assert_eq!(extract_domain("not a url at all"), None);
    }

    #[test]
    fn test_classify_order() {
        let r = registry();
        assert_eq!(r.classify("pib.gov.in"), Some(SourceTier::Tier1));
        assert_eq!(r.classify("ddnews.gov.in"), Some(SourceTier::Tier2));
        assert_eq!(r.classify("agriculture.gov.in"), Some(SourceTier::Government));
        assert_eq!(r.classify("districts.nic.in"), Some(SourceTier::Government));
        assert_eq!(r.classify("whatsapp-forwards.blogspot.com"), None);
    }

    #[test]
    fn test_tier1_mentions_sorted_and_case_insensitive() {
        let r = registry();
        let hits = r.tier1_mentions("Reported by Reuters.com and also thehindu.com today");
        assert_eq!(hits, vec!["reuters.com", "thehindu.com"]);
        assert!(r.tier1_mentions("nothing relevant").is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = DomainRegistry::new(["a.com"], ["b.com"], &["(unclosed"]).unwrap_err();
        assert!(matches!(err, CredenceError::Pattern(_)));
    }

    #[test]
    fn test_custom_tables_lowercased() {
        let r = DomainRegistry::new(["Example.ORG"], Vec::<String>::new(), &[]).unwrap();
        assert_eq!(r.classify("example.org"), Some(SourceTier::Tier1));
    }
}
