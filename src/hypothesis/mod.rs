//! Hypothesis evaluators
//!
//! Each evaluator is a pure function of the kill data and the cheat start
//! dates. The same function is applied to the real data and to every
//! randomized trial, so the two counts are directly comparable.

mod observer;
mod teams;
mod victim;

pub use observer::{
    count_observers_who_later_cheat, ObserverTurnsCheater, DEFAULT_MIN_STREAK_VICTIMS,
};
pub use teams::{
    bucket_for, cheater_distribution, cheaters_per_team, shuffled_cheater_distribution,
    TeamDistribution, BUCKET_COUNT,
};
pub use victim::{count_victims_who_later_cheat, VictimTurnsCheater};

use crate::records::{CheatStartDates, KillsByMatch, MatchStartTimes};
use chrono::NaiveDate;

/// A counting hypothesis over kill events
///
/// Implementations must be deterministic: the same inputs always produce the
/// same count.
pub trait KillHypothesis: Sync {
    /// Short identifier used in reports (e.g. `"victims"`)
    fn name(&self) -> &'static str;

    /// Human-readable description of what is being counted
    fn description(&self) -> &'static str;

    /// Count the players satisfying the hypothesis
    fn count(
        &self,
        kills_by_match: &KillsByMatch,
        match_start: &MatchStartTimes,
        cheat_start: &CheatStartDates,
    ) -> usize;
}

/// True if `account` has a cheat start date on or before `match_day`
pub(crate) fn cheating_at_match_start(
    cheat_start: &CheatStartDates,
    account: &str,
    match_day: NaiveDate,
) -> bool {
    cheat_start
        .get(account)
        .is_some_and(|&start| start <= match_day)
}
