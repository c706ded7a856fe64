// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Source Signal
// ─────────────────────────────────────────────────────────────────────
//! Publisher trust from the claim's URL and web-search mentions.

use credence_types::{Flag, SignalScore, SourceDescriptor, SourceTier};

use crate::registry::{extract_domain, DomainRegistry};

pub const NEUTRAL: f64 = 0.5;
pub const TIER_1: f64 = 0.92;
pub const TIER_2: f64 = 0.72;
pub const GOVERNMENT: f64 = 0.88;
pub const UNKNOWN: f64 = 0.35;
/// Floor applied when the web context mentions a Tier-1 publisher.
pub const WEB_MENTION_FLOOR: f64 = 0.78;

/// Source signal plus the descriptors it discovered.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSignal {
    pub signal: SignalScore,
    pub sources: Vec<SourceDescriptor>,
}

pub fn score(
    source_url: Option<&str>,
    web_context: Option<&str>,
    registry: &DomainRegistry,
) -> SourceSignal {
    let mut value = NEUTRAL;
    let mut flags = Vec::new();
    let mut sources: Vec<SourceDescriptor> = Vec::new();

    if let Some(url) = source_url.filter(|u| !u.trim().is_empty()) {
        let domain = extract_domain(url);
        match domain
            .as_deref()
            .and_then(|d| registry.classify(d).map(|tier| (d, tier)))
        {
            Some((d, tier)) => {
                value = match tier {
                    SourceTier::Tier1 => TIER_1,
                    SourceTier::Tier2 => TIER_2,
                    _ => {
                        flags.push(Flag::GovernmentSourceDetected);
                        GOVERNMENT
                    }
                };
                sources.push(SourceDescriptor::new(d, tier));
            }
            None => {
                value = UNKNOWN;
                flags.push(Flag::UnverifiedSource);
            }
        }
    }

    if let Some(web) = web_context {
        let mentions = registry.tier1_mentions(web);
        if !mentions.is_empty() {
            value = value.max(WEB_MENTION_FLOOR);
        }
        for domain in mentions {
            if !sources.iter().any(|s| s.domain == domain) {
                sources.push(SourceDescriptor::new(domain, SourceTier::WebMention));
            }
        }
    }

    if sources.is_empty() {
        flags.push(Flag::NoVerifiedSource);
    }

    SourceSignal {
        signal: SignalScore::new(value, flags),
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DomainRegistry {
        DomainRegistry::standard().unwrap()
    }

    #[test]
    fn test_no_url_is_neutral() {
        let s = score(None, None, &registry());
        assert_eq!(s.signal.value, NEUTRAL);
        assert_eq!(s.signal.flags, vec![Flag::NoVerifiedSource]);
        assert!(s.sources.is_empty());
    }

    #[test]
    fn test_blank_url_is_absent() {
        let s = score(Some("  "), None, &registry());
        assert_eq!(s.signal.value, NEUTRAL);
        assert!(!s.signal.has(&Flag::UnverifiedSource));
    }

    #[test]
    fn test_tier1_url() {
        let s = score(Some("https://www.reuters.com/world/india/"), None, &registry());
        assert_eq!(s.signal.value, TIER_1);
        assert_eq!(
            s.sources,
            vec![SourceDescriptor::new("reuters.com", SourceTier::Tier1)]
        );
        assert!(s.signal.flags.is_empty());
    }

    #[test]
    fn test_tier2_url() {
        let s = score(Some("ndtv.com/india-news"), None, &registry());
        assert_eq!(s.signal.value, TIER_2);
        assert_eq!(s.sources[0].tier, SourceTier::Tier2);
    }

    #[test]
    fn test_government_pattern() {
        let s = score(Some("https://agriwelfare.gov.in/en/Major"), None, &registry());
        assert_eq!(s.signal.value, GOVERNMENT);
        assert_eq!(s.signal.flags, vec![Flag::GovernmentSourceDetected]);
        assert_eq!(s.sources[0].tier, SourceTier::Government);
    }

    #[test]
    fn test_unknown_url() {
        let s = score(Some("http://free-money-now.xyz/claim"), None, &registry());
        assert_eq!(s.signal.value, UNKNOWN);
        assert_eq!(
            s.signal.flags,
            vec![Flag::UnverifiedSource, Flag::NoVerifiedSource]
        );
    }

    #[test]
    fn test_web_mention_raises_unknown_source() {
        let s = score(
            Some("http://free-money-now.xyz/claim"),
            Some("Fact-check by thehindu.com found no such scheme"),
            &registry(),
        );
        assert_eq!(s.signal.value, WEB_MENTION_FLOOR);
        assert_eq!(
            s.sources,
            vec![SourceDescriptor::new("thehindu.com", SourceTier::WebMention)]
        );
        assert!(s.signal.has(&Flag::UnverifiedSource));
        assert!(!s.signal.has(&Flag::NoVerifiedSource));
    }

    #[test]
    fn test_web_mention_never_lowers() {
        let s = score(
            Some("https://reuters.com/a"),
            Some("reuters.com and apnews.com both report"),
            &registry(),
        );
        assert_eq!(s.signal.value, TIER_1);
        assert_eq!(s.sources.len(), 2);
        assert_eq!(s.sources[1], SourceDescriptor::new("apnews.com", SourceTier::WebMention));
    }

    #[test]
    fn test_web_context_without_mentions() {
        let s = score(None, Some("random blog says so"), &registry());
        assert_eq!(s.signal.value, NEUTRAL);
        assert!(s.signal.has(&Flag::NoVerifiedSource));
    }
}
