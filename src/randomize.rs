//! Null-model randomization within a single match
//!
//! Two shuffles are provided:
//! - [`randomize_match`] permutes player identities in a match's kill events,
//!   keeping every timestamp and every killer/victim slot in place.
//! - [`shuffle_team_labels`] permutes team labels among the players of a
//!   match, keeping match membership fixed.
//!
//! The random source is always passed in, so each trial can own its RNG and
//! seeded runs are reproducible.

use crate::records::{KillEvent, KillsByMatch, TeamSlot, TeamsByMatch};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Distinct players of a match in order of first appearance
pub fn match_players(events: &[KillEvent]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut players = Vec::new();
    for event in events {
        for id in [event.killer.as_str(), event.victim.as_str()] {
            if seen.insert(id) {
                players.push(id);
            }
        }
    }
    players
}

/// Replace every account id in `events` by its image under a fresh, uniformly
/// random bijection on the match's player set.
///
/// Length, per-index timestamps and the killer/victim role of each slot are
/// preserved. An empty match maps to an empty list; a match with a single
/// player maps to itself.
pub fn randomize_match<R: Rng + ?Sized>(events: &[KillEvent], rng: &mut R) -> Vec<KillEvent> {
    if events.is_empty() {
        return Vec::new();
    }

    let players = match_players(events);
    let mut shuffled = players.clone();
    shuffled.shuffle(rng);
    let id_map: HashMap<&str, &str> = players.into_iter().zip(shuffled).collect();

    events
        .iter()
        .map(|event| KillEvent {
            killer: id_map[event.killer.as_str()].to_string(),
            victim: id_map[event.victim.as_str()].to_string(),
            time: event.time,
        })
        .collect()
}

/// Apply [`randomize_match`] independently to every match
pub fn randomize_kills<R: Rng + ?Sized>(
    kills_by_match: &KillsByMatch,
    rng: &mut R,
) -> KillsByMatch {
    kills_by_match
        .iter()
        .map(|(match_id, events)| (match_id.clone(), randomize_match(events, rng)))
        .collect()
}

/// Permute team labels among the slots of one match
pub fn shuffle_team_labels<R: Rng + ?Sized>(slots: &[TeamSlot], rng: &mut R) -> Vec<TeamSlot> {
    let mut labels: Vec<&str> = slots.iter().map(|slot| slot.team_id.as_str()).collect();
    labels.shuffle(rng);

    slots
        .iter()
        .zip(labels)
        .map(|(slot, team_id)| TeamSlot {
            account_id: slot.account_id.clone(),
            team_id: team_id.to_string(),
        })
        .collect()
}

/// Apply [`shuffle_team_labels`] independently to every match
pub fn shuffle_teams<R: Rng + ?Sized>(
    teams_by_match: &TeamsByMatch,
    rng: &mut R,
) -> TeamsByMatch {
    teams_by_match
        .iter()
        .map(|(match_id, slots)| (match_id.clone(), shuffle_team_labels(slots, rng)))
        .collect()
}
