//! Distribution of cheaters across teams
//!
//! Every (match, team) pair is placed in a bucket by the number of cheater
//! accounts on it: 0, 1, 2, 3 or 4+. The randomized variant reshuffles team
//! labels inside each match and re-buckets with the same function.

use crate::randomize::shuffle_teams;
use crate::records::{AccountId, TeamAssignment, TeamsByMatch};
use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Buckets 0, 1, 2, 3 and the saturating 4+ bucket
pub const BUCKET_COUNT: usize = 5;

/// Bucket index for a team with `cheaters` cheater accounts
pub fn bucket_for(cheaters: usize) -> usize {
    cheaters.min(BUCKET_COUNT - 1)
}

/// Number of teams per cheater bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamDistribution {
    pub teams: [usize; BUCKET_COUNT],
}

impl TeamDistribution {
    /// Build a distribution from per-team cheater counts
    pub fn from_team_counts<I: IntoIterator<Item = usize>>(counts: I) -> Self {
        let mut distribution = Self::default();
        for cheaters in counts {
            distribution.teams[bucket_for(cheaters)] += 1;
        }
        distribution
    }

    /// Teams in the given bucket
    pub fn get(&self, bucket: usize) -> usize {
        self.teams[bucket]
    }

    pub fn total_teams(&self) -> usize {
        self.teams.iter().sum()
    }
}

/// Cheater count for every (match, team) pair appearing in `slots`.
///
/// Teams with no cheaters are present with a count of zero.
pub fn cheaters_per_team<'a, I>(
    slots: I,
    cheaters: &HashSet<AccountId>,
) -> HashMap<(&'a str, &'a str), usize>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    let mut per_team = HashMap::new();
    for (match_id, account_id, team_id) in slots {
        let count = per_team.entry((match_id, team_id)).or_insert(0);
        if cheaters.contains(account_id) {
            *count += 1;
        }
    }
    per_team
}

/// Distribution of cheaters across teams in the real assignments
pub fn cheater_distribution(
    assignments: &[TeamAssignment],
    cheaters: &HashSet<AccountId>,
) -> TeamDistribution {
    let per_team = cheaters_per_team(
        assignments
            .iter()
            .map(|row| {
                (
                    row.match_id.as_str(),
                    row.account_id.as_str(),
                    row.team_id.as_str(),
                )
            }),
        cheaters,
    );
    TeamDistribution::from_team_counts(per_team.into_values())
}

/// Distribution after shuffling team labels within every match
pub fn shuffled_cheater_distribution<R: Rng + ?Sized>(
    teams_by_match: &TeamsByMatch,
    cheaters: &HashSet<AccountId>,
    rng: &mut R,
) -> TeamDistribution {
    let shuffled = shuffle_teams(teams_by_match, rng);
    let per_team = cheaters_per_team(
        shuffled.iter().flat_map(|(match_id, slots)| {
            slots.iter().map(move |slot| {
                (
                    match_id.as_str(),
                    slot.account_id.as_str(),
                    slot.team_id.as_str(),
                )
            })
        }),
        cheaters,
    );
    TeamDistribution::from_team_counts(per_team.into_values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::group_teams_by_match;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cheater_set(ids: &[&str]) -> HashSet<AccountId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bucket_saturates_at_four() {
        assert_eq!(bucket_for(0), 0);
        assert_eq!(bucket_for(3), 3);
        assert_eq!(bucket_for(4), 4);
        assert_eq!(bucket_for(7), bucket_for(4));
    }

    #[test]
    fn test_two_cheaters_on_three_player_team() {
        let rows = vec![
            TeamAssignment::new("1", "a", "A"),
            TeamAssignment::new("1", "b", "A"),
            TeamAssignment::new("1", "c", "A"),
        ];
        let dist = cheater_distribution(&rows, &cheater_set(&["a", "b"]));
        assert_eq!(dist.teams, [0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_teams_without_cheaters_land_in_bucket_zero() {
        let rows = vec![
            TeamAssignment::new("1", "a", "A"),
            TeamAssignment::new("1", "b", "B"),
            TeamAssignment::new("2", "a", "A"),
        ];
        let dist = cheater_distribution(&rows, &cheater_set(&["a"]));
        assert_eq!(dist.teams, [1, 2, 0, 0, 0]);
        assert_eq!(dist.total_teams(), 3);
    }

    #[test]
    fn test_same_team_label_in_different_matches_is_separate() {
        let rows = vec![
            TeamAssignment::new("1", "a", "A"),
            TeamAssignment::new("2", "b", "A"),
        ];
        let dist = cheater_distribution(&rows, &cheater_set(&["a", "b"]));
        assert_eq!(dist.get(1), 2);
    }

    #[test]
    fn test_seven_cheaters_bucket_like_four() {
        let seven: Vec<_> = (0..7)
            .map(|i| TeamAssignment::new("1", &format!("p{i}"), "A"))
            .collect();
        let four: Vec<_> = (0..4)
            .map(|i| TeamAssignment::new("1", &format!("p{i}"), "A"))
            .collect();
        let all: HashSet<AccountId> = (0..7).map(|i| format!("p{i}")).collect();

        assert_eq!(cheater_distribution(&seven, &all), cheater_distribution(&four, &all));
        assert_eq!(cheater_distribution(&seven, &all).get(4), 1);
    }

    #[test]
    fn test_shuffled_path_saturates_like_real_path() {
        // Every slot in the match is a cheater on a single team, so any shuffle
        // must land the team in the 4+ bucket.
        let rows: Vec<_> = (0..6)
            .map(|i| TeamAssignment::new("1", &format!("p{i}"), "A"))
            .collect();
        let all: HashSet<AccountId> = (0..6).map(|i| format!("p{i}")).collect();
        let by_match = group_teams_by_match(&rows);

        let mut rng = StdRng::seed_from_u64(8);
        let shuffled = shuffled_cheater_distribution(&by_match, &all, &mut rng);
        assert_eq!(shuffled, cheater_distribution(&rows, &all));
        assert_eq!(shuffled.teams, [0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_shuffle_preserves_team_and_cheater_totals() {
        let rows = vec![
            TeamAssignment::new("1", "a", "A"),
            TeamAssignment::new("1", "b", "A"),
            TeamAssignment::new("1", "c", "B"),
            TeamAssignment::new("1", "d", "B"),
            TeamAssignment::new("2", "e", "A"),
            TeamAssignment::new("2", "f", "B"),
        ];
        let cheaters = cheater_set(&["a", "b", "e"]);
        let by_match = group_teams_by_match(&rows);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let dist = shuffled_cheater_distribution(&by_match, &cheaters, &mut rng);
            assert_eq!(dist.total_teams(), 4);
            let cheaters_placed: usize = dist.teams.iter().enumerate().map(|(k, n)| k * n).sum();
            assert_eq!(cheaters_placed, 3);
        }
    }
}
