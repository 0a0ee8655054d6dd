//! "Victim turns cheater": players killed by an already-active cheater who
//! only start cheating after that kill

use super::{cheating_at_match_start, KillHypothesis};
use crate::records::{CheatStartDates, KillsByMatch, MatchStartTimes};
use std::collections::HashSet;

/// Count distinct victims `V` with at least one kill `(K, V, t)` such that
/// - `K` was cheating on or before the match start date,
/// - `V` has a cheat start date strictly after the match start date, and
/// - `V`'s cheat start date is strictly after the calendar date of `t`.
///
/// Matches without events or without a known start time are skipped.
pub fn count_victims_who_later_cheat(
    kills_by_match: &KillsByMatch,
    match_start: &MatchStartTimes,
    cheat_start: &CheatStartDates,
) -> usize {
    let mut victims = HashSet::new();

    for (match_id, events) in kills_by_match {
        if events.is_empty() {
            continue;
        }
        let Some(start) = match_start.get(match_id) else {
            tracing::debug!("No start time for match {}, skipping", match_id);
            continue;
        };
        let match_day = start.date();

        for event in events {
            if !cheating_at_match_start(cheat_start, &event.killer, match_day) {
                continue;
            }
            let Some(&victim_start) = cheat_start.get(&event.victim) else {
                continue;
            };
            if victim_start > match_day && victim_start > event.time.date() {
                victims.insert(event.victim.as_str());
            }
        }
    }

    victims.len()
}

/// [`KillHypothesis`] wrapper for [`count_victims_who_later_cheat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct VictimTurnsCheater;

impl KillHypothesis for VictimTurnsCheater {
    fn name(&self) -> &'static str {
        "victims"
    }

    fn description(&self) -> &'static str {
        "Victims who begin cheating after being killed by an already-active cheater"
    }

    fn count(
        &self,
        kills_by_match: &KillsByMatch,
        match_start: &MatchStartTimes,
        cheat_start: &CheatStartDates,
    ) -> usize {
        count_victims_who_later_cheat(kills_by_match, match_start, cheat_start)
    }
}
