// ─────────────────────────────────────────────────────────────────────
// Credence Kernel — Community Signal
// ─────────────────────────────────────────────────────────────────────
//! On-ledger vote tallies. Validator votes outweigh user votes, and the
//! signal stays neutral until enough votes exist.

use credence_types::{CommunityParams, Flag, SignalScore, VoteTally};

pub const NEUTRAL: f64 = 0.5;
const CONSENSUS_TRUE: f64 = 0.75;
const CONSENSUS_FALSE: f64 = 0.35;

pub fn score(votes: Option<&VoteTally>, params: &CommunityParams) -> SignalScore {
    let votes = match votes {
        Some(v) => v,
        None => return SignalScore::new(NEUTRAL, vec![Flag::NoCommunityData]),
    };

    if votes.total() < params.min_votes {
        return SignalScore::new(NEUTRAL, vec![Flag::InsufficientCommunityVotes]);
    }

    let user_fraction = votes.user.true_fraction();
    let value = if votes.validator.total() > 0 {
        let validator_fraction = votes.validator.true_fraction();
        (user_fraction + validator_fraction * params.validator_weight)
            / (1.0 + params.validator_weight)
    } else {
        user_fraction
    };

    let mut flags = Vec::new();
    if value > CONSENSUS_TRUE {
        flags.push(Flag::CommunityConsensusTrue);
    } else if value < CONSENSUS_FALSE {
        flags.push(Flag::CommunityConsensusFalse);
    }

    SignalScore::new(value, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_types::VoteCount;

    fn tally(ut: u64, uf: u64, vt: u64, vf: u64) -> VoteTally {
        VoteTally::new(VoteCount::new(ut, uf), VoteCount::new(vt, vf))
    }

    #[test]
    fn test_no_votes() {
        let s = score(None, &CommunityParams::default());
        assert_eq!(s.value, NEUTRAL);
        assert_eq!(s.flags, vec![Flag::NoCommunityData]);
    }

    #[test]
    fn test_insufficient_regardless_of_skew() {
        for t in [tally(4, 0, 0, 0), tally(0, 2, 0, 2), tally(0, 0, 4, 0)] {
            let s = score(Some(&t), &CommunityParams::default());
            assert_eq!(s.value, NEUTRAL);
            assert_eq!(s.flags, vec![Flag::InsufficientCommunityVotes]);
        }
    }

    #[test]
    fn test_users_only() {
        let s = score(Some(&tally(4, 1, 0, 0)), &CommunityParams::default());
        assert!((s.value - 0.8).abs() < 1e-12);
        assert_eq!(s.flags, vec![Flag::CommunityConsensusTrue]);
    }

    #[test]
    fn test_validators_weighted_three_times() {
        // user 0.5, validator 1.0 → (0.5 + 3.0) / 4 = 0.875
        let s = score(Some(&tally(2, 2, 3, 0)), &CommunityParams::default());
        assert!((s.value - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_validators_without_users() {
        // user fraction is 0 when no users voted: (0 + 3 * 1.0) / 4
        let s = score(Some(&tally(0, 0, 5, 0)), &CommunityParams::default());
        assert!((s.value - 0.75).abs() < 1e-12);
        assert!(s.flags.is_empty());
    }

    #[test]
    fn test_consensus_false() {
        let s = score(Some(&tally(1, 9, 0, 4)), &CommunityParams::default());
        assert!((s.value - 0.025).abs() < 1e-12);
        assert_eq!(s.flags, vec![Flag::CommunityConsensusFalse]);
    }
}
