//! "Observer turns cheater": players who died after a cheater had already
//! racked up a kill streak in the same match, and who start cheating later

use super::{cheating_at_match_start, KillHypothesis};
use crate::records::{CheatStartDates, KillEvent, KillsByMatch, MatchStartTimes};
use crate::randomize::match_players;
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

/// Distinct victims a cheater must have before the observer's death
pub const DEFAULT_MIN_STREAK_VICTIMS: usize = 3;

/// Count distinct players `A` such that, in some match with an active cheater:
/// - `A` was killed at least once; let `tA` be the first death,
/// - `A` was not cheating at match start,
/// - `A` starts cheating strictly after the calendar date of `tA`, and
/// - some other active cheater `B` killed at least three distinct victims
///   strictly before `tA`.
pub fn count_observers_who_later_cheat(
    kills_by_match: &KillsByMatch,
    match_start: &MatchStartTimes,
    cheat_start: &CheatStartDates,
) -> usize {
    count_observers(
        kills_by_match,
        match_start,
        cheat_start,
        DEFAULT_MIN_STREAK_VICTIMS,
    )
}

fn count_observers(
    kills_by_match: &KillsByMatch,
    match_start: &MatchStartTimes,
    cheat_start: &CheatStartDates,
    min_streak_victims: usize,
) -> usize {
    let mut observers: HashSet<&str> = HashSet::new();

    for (match_id, events) in kills_by_match {
        if events.is_empty() {
            continue;
        }
        let Some(start) = match_start.get(match_id) else {
            tracing::debug!("No start time for match {}, skipping", match_id);
            continue;
        };
        let match_day = start.date();

        let players = match_players(events);
        let active: HashSet<&str> = players
            .iter()
            .copied()
            .filter(|p| cheating_at_match_start(cheat_start, p, match_day))
            .collect();
        if active.is_empty() {
            continue;
        }

        let mut sorted: Vec<&KillEvent> = events.iter().collect();
        sorted.sort_by_key(|event| event.time);

        let mut first_death: HashMap<&str, NaiveDateTime> = HashMap::new();
        for event in &sorted {
            first_death.entry(event.victim.as_str()).or_insert(event.time);
        }

        for &observer in &players {
            let Some(&death) = first_death.get(observer) else {
                continue;
            };
            if active.contains(observer) {
                continue;
            }
            match cheat_start.get(observer) {
                Some(&began) if began > death.date() => {}
                _ => continue,
            }

            let witnessed_streak = active
                .iter()
                .filter(|&&cheater| cheater != observer)
                .any(|&cheater| {
                    distinct_victims_before(&sorted, cheater, death) >= min_streak_victims
                });
            if witnessed_streak {
                observers.insert(observer);
            }
        }
    }

    observers.len()
}

/// Distinct victims of `killer` among kills strictly before `cutoff`.
///
/// `sorted` must be in chronological order.
fn distinct_victims_before(sorted: &[&KillEvent], killer: &str, cutoff: NaiveDateTime) -> usize {
    sorted
        .iter()
        .take_while(|event| event.time < cutoff)
        .filter(|event| event.killer == killer)
        .map(|event| event.victim.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// [`KillHypothesis`] for observers of a cheater's kill streak
#[derive(Debug, Clone, Copy)]
pub struct ObserverTurnsCheater {
    pub min_streak_victims: usize,
}

impl Default for ObserverTurnsCheater {
    fn default() -> Self {
        Self {
            min_streak_victims: DEFAULT_MIN_STREAK_VICTIMS,
        }
    }
}

impl KillHypothesis for ObserverTurnsCheater {
    fn name(&self) -> &'static str {
        "observers"
    }

    fn description(&self) -> &'static str {
        "Observers of a cheater's kill streak who later cheat"
    }

    fn count(
        &self,
        kills_by_match: &KillsByMatch,
        match_start: &MatchStartTimes,
        cheat_start: &CheatStartDates,
    ) -> usize {
        count_observers(
            kills_by_match,
            match_start,
            cheat_start,
            self.min_streak_victims,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::KillLog;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dates(pairs: &[(&str, &str)]) -> CheatStartDates {
        pairs
            .iter()
            .map(|(a, d)| (a.to_string(), NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()))
            .collect()
    }

    fn count(log: &KillLog, cheat_start: &CheatStartDates) -> usize {
        count_observers_who_later_cheat(&log.kills_by_match, &log.match_start, cheat_start)
    }

    /// Cheater `c` kills three distinct victims, then kills observer `a`
    fn streak_then_observer(observer_kill: &str) -> KillLog {
        let mut log = KillLog::new();
        log.push("m1", KillEvent::new("c", "v1", ts("2020-01-05 10:00:00")));
        log.push("m1", KillEvent::new("c", "v2", ts("2020-01-05 10:05:00")));
        log.push("m1", KillEvent::new("c", "v3", ts("2020-01-05 10:10:00")));
        log.push("m1", KillEvent::new("c", "a", ts(observer_kill)));
        log
    }

    #[test]
    fn test_observer_after_streak_counts() {
        let log = streak_then_observer("2020-01-05 10:15:00");
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 1);
    }

    #[test]
    fn test_same_victim_three_times_is_not_a_streak() {
        let mut log = KillLog::new();
        log.push("m1", KillEvent::new("c", "v", ts("2020-01-05 10:00:00")));
        log.push("m1", KillEvent::new("c", "v", ts("2020-01-05 10:05:00")));
        log.push("m1", KillEvent::new("c", "v", ts("2020-01-05 10:10:00")));
        log.push("m1", KillEvent::new("c", "a", ts("2020-01-05 10:15:00")));
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);

        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_kill_at_same_instant_as_death_is_not_before() {
        let log = streak_then_observer("2020-01-05 10:10:00");
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_observer_must_start_after_death_date() {
        let log = streak_then_observer("2020-01-05 10:15:00");
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-05")]);
        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_observer_never_cheating_is_ignored() {
        let log = streak_then_observer("2020-01-05 10:15:00");
        let cheat_start = dates(&[("c", "2020-01-01")]);
        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_match_without_active_cheater_is_skipped() {
        let log = streak_then_observer("2020-01-05 10:15:00");
        let cheat_start = dates(&[("c", "2020-01-06"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_first_death_is_used() {
        // `a` dies before the streak completes, then again after it.
        let mut log = streak_then_observer("2020-01-05 10:15:00");
        log.push("m1", KillEvent::new("x", "a", ts("2020-01-05 09:59:00")));
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 0);
    }

    #[test]
    fn test_unsorted_source_order_is_handled() {
        let mut log = KillLog::new();
        log.push("m1", KillEvent::new("c", "a", ts("2020-01-05 10:15:00")));
        log.push("m1", KillEvent::new("c", "v3", ts("2020-01-05 10:10:00")));
        log.push("m1", KillEvent::new("c", "v1", ts("2020-01-05 10:00:00")));
        log.push("m1", KillEvent::new("c", "v2", ts("2020-01-05 10:05:00")));
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 1);
    }

    #[test]
    fn test_streak_by_other_cheater_counts() {
        // Observer is killed by a non-cheater; the streak belongs to `c`.
        let mut log = KillLog::new();
        log.push("m1", KillEvent::new("c", "v1", ts("2020-01-05 10:00:00")));
        log.push("m1", KillEvent::new("c", "v2", ts("2020-01-05 10:01:00")));
        log.push("m1", KillEvent::new("c", "v3", ts("2020-01-05 10:02:00")));
        log.push("m1", KillEvent::new("n", "a", ts("2020-01-05 10:03:00")));
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-07")]);
        assert_eq!(count(&log, &cheat_start), 1);
    }

    #[test]
    fn test_observer_counted_once_across_matches() {
        let mut log = streak_then_observer("2020-01-05 10:15:00");
        log.push("m2", KillEvent::new("c", "w1", ts("2020-01-06 10:00:00")));
        log.push("m2", KillEvent::new("c", "w2", ts("2020-01-06 10:01:00")));
        log.push("m2", KillEvent::new("c", "w3", ts("2020-01-06 10:02:00")));
        log.push("m2", KillEvent::new("c", "a", ts("2020-01-06 10:03:00")));
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        assert_eq!(count(&log, &cheat_start), 1);
    }

    #[test]
    fn test_custom_streak_threshold() {
        let log = streak_then_observer("2020-01-05 10:15:00");
        let cheat_start = dates(&[("c", "2020-01-01"), ("a", "2020-01-10")]);
        let strict = ObserverTurnsCheater {
            min_streak_victims: 4,
        };
        assert_eq!(
            strict.count(&log.kills_by_match, &log.match_start, &cheat_start),
            0
        );
        assert_eq!(
            ObserverTurnsCheater::default().count(
                &log.kills_by_match,
                &log.match_start,
                &cheat_start,
            ),
            1
        );
    }
}
