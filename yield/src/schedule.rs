//! Distribution time gate.
//!
//! `Idle` while less than one day has passed since the last distribution,
//! `Eligible` afterwards. Executing a distribution moves the checkpoint to
//! `now`, which puts the gate back in `Idle`.

use accrue_types::params::SECONDS_PER_DAY;
use accrue_types::Timestamp;

/// Where the protocol sits in its distribution cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistributionPhase {
    /// Not yet distributable; `remaining_secs` until eligibility.
    Idle { remaining_secs: u64 },
    /// Distributable; `elapsed_secs` since the last checkpoint.
    Eligible { elapsed_secs: u64 },
}

impl DistributionPhase {
    pub fn at(last_distribution: Timestamp, now: Timestamp) -> Self {
        let elapsed_secs = last_distribution.elapsed_since(now);
        if elapsed_secs >= SECONDS_PER_DAY {
            Self::Eligible { elapsed_secs }
        } else {
            Self::Idle {
                remaining_secs: SECONDS_PER_DAY - elapsed_secs,
            }
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_a_full_day_has_passed() {
        let last = Timestamp::new(1_000);
        assert_eq!(
            DistributionPhase::at(last, Timestamp::new(1_000)),
            DistributionPhase::Idle {
                remaining_secs: SECONDS_PER_DAY
            }
        );
        assert_eq!(
            DistributionPhase::at(last, Timestamp::new(1_000 + SECONDS_PER_DAY - 1)),
            DistributionPhase::Idle { remaining_secs: 1 }
        );
    }

    #[test]
    fn eligible_from_exactly_one_day() {
        let last = Timestamp::new(1_000);
        let phase = DistributionPhase::at(last, Timestamp::new(1_000 + SECONDS_PER_DAY));
        assert!(phase.is_eligible());
        assert_eq!(
            phase,
            DistributionPhase::Eligible {
                elapsed_secs: SECONDS_PER_DAY
            }
        );
    }

    #[test]
    fn clock_behind_checkpoint_reads_as_idle() {
        let phase = DistributionPhase::at(Timestamp::new(5_000), Timestamp::new(10));
        assert!(!phase.is_eligible());
    }
}
