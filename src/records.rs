//! In-memory records for cheater, team and kill data
//!
//! All records are immutable once loaded. Randomized trials build their own
//! copies of `KillsByMatch` / `TeamsByMatch` and never touch the base data.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Account identifier (opaque string from the input files)
pub type AccountId = String;

/// Match identifier (opaque string from the input files)
pub type MatchId = String;

/// Account → first day the account is deemed to be cheating.
///
/// Absence from the map means the account was never flagged.
pub type CheatStartDates = HashMap<AccountId, NaiveDate>;

/// Kill events grouped by match, in source-file order within each match.
///
/// Ordered by match id so that randomized trials consume random numbers in a
/// stable order.
pub type KillsByMatch = BTreeMap<MatchId, Vec<KillEvent>>;

/// Match → timestamp of its earliest kill event
pub type MatchStartTimes = HashMap<MatchId, NaiveDateTime>;

/// Team slots grouped by match, in source-file order within each match
pub type TeamsByMatch = BTreeMap<MatchId, Vec<TeamSlot>>;

/// A single kill inside a match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KillEvent {
    pub killer: AccountId,
    pub victim: AccountId,
    pub time: NaiveDateTime,
}

impl KillEvent {
    pub fn new(
        killer: impl Into<AccountId>,
        victim: impl Into<AccountId>,
        time: NaiveDateTime,
    ) -> Self {
        Self {
            killer: killer.into(),
            victim: victim.into(),
            time,
        }
    }
}

/// Kill events by match together with the derived match start times
#[derive(Debug, Clone, Default)]
pub struct KillLog {
    pub kills_by_match: KillsByMatch,
    pub match_start: MatchStartTimes,
}

impl KillLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a kill to its match, keeping the match start time at the
    /// earliest timestamp seen so far.
    pub fn push(&mut self, match_id: &str, event: KillEvent) {
        self.match_start
            .entry(match_id.to_string())
            .and_modify(|start| {
                if event.time < *start {
                    *start = event.time;
                }
            })
            .or_insert(event.time);
        self.kills_by_match
            .entry(match_id.to_string())
            .or_default()
            .push(event);
    }

    /// Number of matches with at least one kill
    pub fn match_count(&self) -> usize {
        self.kills_by_match.len()
    }

    /// Total number of kill events across all matches
    pub fn event_count(&self) -> usize {
        self.kills_by_match.values().map(Vec::len).sum()
    }
}

impl FromIterator<(MatchId, KillEvent)> for KillLog {
    fn from_iter<I: IntoIterator<Item = (MatchId, KillEvent)>>(iter: I) -> Self {
        let mut log = KillLog::new();
        for (match_id, event) in iter {
            log.push(&match_id, event);
        }
        log
    }
}

/// One row of the team file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamAssignment {
    pub match_id: MatchId,
    pub account_id: AccountId,
    pub team_id: String,
}

impl TeamAssignment {
    pub fn new(match_id: &str, account_id: &str, team_id: &str) -> Self {
        Self {
            match_id: match_id.to_string(),
            account_id: account_id.to_string(),
            team_id: team_id.to_string(),
        }
    }
}

/// A player's seat in a match: which account sits on which team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSlot {
    pub account_id: AccountId,
    pub team_id: String,
}

/// Group team rows by match, preserving row order inside each match
pub fn group_teams_by_match(assignments: &[TeamAssignment]) -> TeamsByMatch {
    let mut by_match = TeamsByMatch::new();
    for row in assignments {
        by_match
            .entry(row.match_id.clone())
            .or_default()
            .push(TeamSlot {
                account_id: row.account_id.clone(),
                team_id: row.team_id.clone(),
            });
    }
    by_match
}
