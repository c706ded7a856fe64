// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Flag Vocabulary
// ─────────────────────────────────────────────────────────────────────
//! Closed vocabulary of explainability flags.
//!
//! Every flag an extractor can raise is a variant of [`Flag`]. On the wire
//! a flag is its legacy string form (`"implausible_amount:₹60,000"`);
//! [`Flag::from_str`] parses that form back into the same variant, so
//! consumers match on [`FlagKind`] instead of substrings.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// The extractor that owns a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Source,
    Linguistic,
    Numerical,
    RagMatch,
    Temporal,
    Community,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::Source,
        Signal::Linguistic,
        Signal::Numerical,
        Signal::RagMatch,
        Signal::Temporal,
        Signal::Community,
    ];

    /// Human label used by the explainer.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Source => "Source Trust",
            Signal::Linguistic => "Language Quality",
            Signal::Numerical => "Amount Plausibility",
            Signal::RagMatch => "Database Match",
            Signal::Temporal => "Timeliness",
            Signal::Community => "Community Votes",
        }
    }
}

/// Payload-free discriminant of a [`Flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKind {
    GovernmentSourceDetected,
    UnverifiedSource,
    NoVerifiedSource,
    ClickbaitLanguage,
    UrgencyManipulation,
    SchemeImpersonationSuspected,
    ExcessiveCaps,
    ImplausibleAmount,
    LargeTransferClaim,
    UniversalBenefitClaim,
    ExtremePercentage,
    NoDatabaseMatch,
    DatabaseFraudIndicator,
    StrongDatabaseMatch,
    BreakingNewsUnverified,
    PotentiallyRecycledNews,
    NoCommunityData,
    InsufficientCommunityVotes,
    CommunityConsensusTrue,
    CommunityConsensusFalse,
}

impl FlagKind {
    /// Wire identifier (the part before any `:` payload).
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::GovernmentSourceDetected => "government_source_detected",
            FlagKind::UnverifiedSource => "unverified_source",
            FlagKind::NoVerifiedSource => "no_verified_source",
            FlagKind::ClickbaitLanguage => "clickbait_language",
            FlagKind::UrgencyManipulation => "urgency_manipulation",
            FlagKind::SchemeImpersonationSuspected => "scheme_impersonation_suspected",
            FlagKind::ExcessiveCaps => "excessive_caps",
            FlagKind::ImplausibleAmount => "implausible_amount",
            FlagKind::LargeTransferClaim => "large_transfer_claim",
            FlagKind::UniversalBenefitClaim => "universal_benefit_claim",
            FlagKind::ExtremePercentage => "extreme_percentage",
            FlagKind::NoDatabaseMatch => "no_database_match",
            FlagKind::DatabaseFraudIndicator => "database_fraud_indicator",
            FlagKind::StrongDatabaseMatch => "strong_database_match",
            FlagKind::BreakingNewsUnverified => "breaking_news_unverified",
            FlagKind::PotentiallyRecycledNews => "potentially_recycled_news",
            FlagKind::NoCommunityData => "no_community_data",
            FlagKind::InsufficientCommunityVotes => "insufficient_community_votes",
            FlagKind::CommunityConsensusTrue => "community_consensus_true",
            FlagKind::CommunityConsensusFalse => "community_consensus_false",
        }
    }

    pub fn signal(&self) -> Signal {
        match self {
            FlagKind::GovernmentSourceDetected
            | FlagKind::UnverifiedSource
            | FlagKind::NoVerifiedSource => Signal::Source,
            FlagKind::ClickbaitLanguage
            | FlagKind::UrgencyManipulation
            | FlagKind::SchemeImpersonationSuspected
            | FlagKind::ExcessiveCaps => Signal::Linguistic,
            FlagKind::ImplausibleAmount
            | FlagKind::LargeTransferClaim
            | FlagKind::UniversalBenefitClaim
            | FlagKind::ExtremePercentage => Signal::Numerical,
            FlagKind::NoDatabaseMatch
            | FlagKind::DatabaseFraudIndicator
            | FlagKind::StrongDatabaseMatch => Signal::RagMatch,
            FlagKind::BreakingNewsUnverified | FlagKind::PotentiallyRecycledNews => {
                Signal::Temporal
            }
            FlagKind::NoCommunityData
            | FlagKind::InsufficientCommunityVotes
            | FlagKind::CommunityConsensusTrue
            | FlagKind::CommunityConsensusFalse => Signal::Community,
        }
    }
}

/// A machine-readable explanation for a deduction or boost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    GovernmentSourceDetected,
    UnverifiedSource,
    NoVerifiedSource,
    /// Number of distinct clickbait detectors that fired.
    ClickbaitLanguage { signals: usize },
    UrgencyManipulation,
    SchemeImpersonationSuspected,
    ExcessiveCaps,
    /// Amount in rupees.
    ImplausibleAmount { amount: u64 },
    LargeTransferClaim { amount: u64 },
    UniversalBenefitClaim,
    ExtremePercentage { value: u64 },
    NoDatabaseMatch,
    DatabaseFraudIndicator,
    /// Word overlap with the retrieval context, whole percent.
    StrongDatabaseMatch { percent: u32 },
    BreakingNewsUnverified,
    PotentiallyRecycledNews { year: i32 },
    NoCommunityData,
    InsufficientCommunityVotes,
    CommunityConsensusTrue,
    CommunityConsensusFalse,
}

impl Flag {
    pub fn kind(&self) -> FlagKind {
        match self {
            Flag::GovernmentSourceDetected => FlagKind::GovernmentSourceDetected,
            Flag::UnverifiedSource => FlagKind::UnverifiedSource,
            Flag::NoVerifiedSource => FlagKind::NoVerifiedSource,
            Flag::ClickbaitLanguage { .. } => FlagKind::ClickbaitLanguage,
            Flag::UrgencyManipulation => FlagKind::UrgencyManipulation,
            Flag::SchemeImpersonationSuspected => FlagKind::SchemeImpersonationSuspected,
            Flag::ExcessiveCaps => FlagKind::ExcessiveCaps,
            Flag::ImplausibleAmount { .. } => FlagKind::ImplausibleAmount,
            Flag::LargeTransferClaim { .. } => FlagKind::LargeTransferClaim,
            Flag::UniversalBenefitClaim => FlagKind::UniversalBenefitClaim,
            Flag::ExtremePercentage { .. } => FlagKind::ExtremePercentage,
            Flag::NoDatabaseMatch => FlagKind::NoDatabaseMatch,
            Flag::DatabaseFraudIndicator => FlagKind::DatabaseFraudIndicator,
            Flag::StrongDatabaseMatch { .. } => FlagKind::StrongDatabaseMatch,
            Flag::BreakingNewsUnverified => FlagKind::BreakingNewsUnverified,
            Flag::PotentiallyRecycledNews { .. } => FlagKind::PotentiallyRecycledNews,
            Flag::NoCommunityData => FlagKind::NoCommunityData,
            Flag::InsufficientCommunityVotes => FlagKind::InsufficientCommunityVotes,
            Flag::CommunityConsensusTrue => FlagKind::CommunityConsensusTrue,
            Flag::CommunityConsensusFalse => FlagKind::CommunityConsensusFalse,
        }
    }

    pub fn signal(&self) -> Signal {
        self.kind().signal()
    }

    /// Readable phrase for explanations, e.g. `"Implausible Amount (₹60,000)"`.
    pub fn describe(&self) -> String {
        let title = title_case(self.kind().as_str());
        match self {
            Flag::ClickbaitLanguage { signals } => format!("{title} ({signals} signals)"),
            Flag::ImplausibleAmount { amount } | Flag::LargeTransferClaim { amount } => {
                format!("{title} ({})", format_rupees(*amount))
            }
            Flag::ExtremePercentage { value } => format!("{title} ({value}%)"),
            Flag::StrongDatabaseMatch { percent } => format!("{title} ({percent}%)"),
            Flag::PotentiallyRecycledNews { year } => format!("{title} ({year})"),
            _ => title,
        }
    }
}

fn title_case(ident: &str) -> String {
    ident
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a rupee amount with comma thousands separators: `₹1,234,567`.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    out.push('₹');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn parse_rupees(raw: &str) -> Option<u64> {
    let digits: String = raw
        .strip_prefix('₹')?
        .chars()
        .filter(|c| *c != ',')
        .collect();
    digits.parse().ok()
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind().as_str();
        match self {
            Flag::ClickbaitLanguage { signals } => write!(f, "{kind}:{signals}_signals"),
            Flag::ImplausibleAmount { amount } | Flag::LargeTransferClaim { amount } => {
                write!(f, "{kind}:{}", format_rupees(*amount))
            }
            Flag::ExtremePercentage { value } => write!(f, "{kind}:{value}%"),
            Flag::StrongDatabaseMatch { percent } => write!(f, "{kind}:{percent}%"),
            Flag::PotentiallyRecycledNews { year } => write!(f, "{kind}:{year}"),
            _ => f.write_str(kind),
        }
    }
}

/// Error returned when a string is not a member of the flag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlag(pub String);

impl fmt::Display for UnknownFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown flag '{}'", self.0)
    }
}

impl std::error::Error for UnknownFlag {}

impl FromStr for Flag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownFlag(s.to_string());
        let (kind, payload) = match s.split_once(':') {
            Some((kind, payload)) => (kind, Some(payload)),
            None => (s, None),
        };

        let flag = match (kind, payload) {
            ("government_source_detected", None) => Flag::GovernmentSourceDetected,
            ("unverified_source", None) => Flag::UnverifiedSource,
            ("no_verified_source", None) => Flag::NoVerifiedSource,
            ("clickbait_language", Some(p)) => Flag::ClickbaitLanguage {
                signals: p
                    .strip_suffix("_signals")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(unknown)?,
            },
            ("urgency_manipulation", None) => Flag::UrgencyManipulation,
            ("scheme_impersonation_suspected", None) => Flag::SchemeImpersonationSuspected,
            ("excessive_caps", None) => Flag::ExcessiveCaps,
            ("implausible_amount", Some(p)) => Flag::ImplausibleAmount {
                amount: parse_rupees(p).ok_or_else(unknown)?,
            },
            ("large_transfer_claim", Some(p)) => Flag::LargeTransferClaim {
                amount: parse_rupees(p).ok_or_else(unknown)?,
            },
            ("universal_benefit_claim", None) => Flag::UniversalBenefitClaim,
            ("extreme_percentage", Some(p)) => Flag::ExtremePercentage {
                value: p
                    .strip_suffix('%')
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(unknown)?,
            },
            ("no_database_match", None) => Flag::NoDatabaseMatch,
            ("database_fraud_indicator", None) => Flag::DatabaseFraudIndicator,
            ("strong_database_match", Some(p)) => Flag::StrongDatabaseMatch {
                percent: p
                    .strip_suffix('%')
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(unknown)?,
            },
            ("breaking_news_unverified", None) => Flag::BreakingNewsUnverified,
            ("potentially_recycled_news", Some(p)) => Flag::PotentiallyRecycledNews {
                year: p.parse().map_err(|_| unknown())?,
            },
            ("no_community_data", None) => Flag::NoCommunityData,
            ("insufficient_community_votes", None) => Flag::InsufficientCommunityVotes,
            ("community_consensus_true", None) => Flag::CommunityConsensusTrue,
            ("community_consensus_false", None) => Flag::CommunityConsensusFalse,
            _ => return Err(unknown()),
        };
        Ok(flag)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
