// Trial driver: build N randomized worlds, evaluate, summarize
//
// Each trial owns a StdRng seeded from (base_seed + trial index), so a trial's
// outcome depends only on its index. Sequential and parallel runs therefore
// produce the same counts in the same order.

use crate::hypothesis::{
    shuffled_cheater_distribution, KillHypothesis, TeamDistribution, BUCKET_COUNT,
};
use crate::montecarlo::config::TrialConfig;
use crate::montecarlo::statistics::{summarize, Estimate};
use crate::randomize::randomize_kills;
use crate::records::{AccountId, CheatStartDates, KillLog, TeamsByMatch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// A [`TrialConfig`] with its seed resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialPlan {
    pub num_trials: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl TrialPlan {
    pub fn new(num_trials: usize, seed: u64) -> Self {
        Self {
            num_trials,
            seed,
            parallel: false,
        }
    }

    /// RNG for trial `index`
    pub fn trial_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(index as u64))
    }
}

impl From<&TrialConfig> for TrialPlan {
    fn from(config: &TrialConfig) -> Self {
        Self {
            num_trials: config.num_trials,
            seed: config.resolve_seed(),
            parallel: config.parallel,
        }
    }
}

/// Per-bucket estimates for the team distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamEstimate {
    pub buckets: [Estimate; BUCKET_COUNT],
}

impl TeamEstimate {
    pub fn get(&self, bucket: usize) -> &Estimate {
        &self.buckets[bucket]
    }
}

fn run_seeded<T, F>(plan: &TrialPlan, trial: F) -> Vec<T>
where
    T: Send,
    F: Fn(&mut StdRng) -> T + Sync + Send,
{
    if plan.parallel {
        (0..plan.num_trials)
            .into_par_iter()
            .map(|i| trial(&mut plan.trial_rng(i)))
            .collect()
    } else {
        (0..plan.num_trials)
            .map(|i| trial(&mut plan.trial_rng(i)))
            .collect()
    }
}

/// Counts of `hypothesis` in each randomized trial, in trial order
pub fn kill_trial_counts<H>(
    hypothesis: &H,
    log: &KillLog,
    cheat_start: &CheatStartDates,
    plan: &TrialPlan,
) -> Vec<usize>
where
    H: KillHypothesis + ?Sized,
{
    run_seeded(plan, |rng| {
        let randomized = randomize_kills(&log.kills_by_match, rng);
        hypothesis.count(&randomized, &log.match_start, cheat_start)
    })
}

/// Expected count of `hypothesis` under identity randomization, with 95% CI
pub fn run_trials<H>(
    hypothesis: &H,
    log: &KillLog,
    cheat_start: &CheatStartDates,
    plan: &TrialPlan,
) -> Estimate
where
    H: KillHypothesis + ?Sized,
{
    tracing::info!(
        "Running {} trials for '{}' (seed {}, parallel={})",
        plan.num_trials,
        hypothesis.name(),
        plan.seed,
        plan.parallel
    );
    let counts = kill_trial_counts(hypothesis, log, cheat_start, plan);
    let estimate = summarize(&counts);
    tracing::debug!(
        "'{}': mean {:.3}, std_dev {:.3}",
        hypothesis.name(),
        estimate.mean,
        estimate.std_dev
    );
    estimate
}

/// Team distributions of each randomized trial, in trial order
pub fn team_trial_distributions(
    teams_by_match: &TeamsByMatch,
    cheaters: &HashSet<AccountId>,
    plan: &TrialPlan,
) -> Vec<TeamDistribution> {
    run_seeded(plan, |rng| shuffled_cheater_distribution(teams_by_match, cheaters, rng))
}

/// Expected team distribution under team-label shuffling, per bucket
pub fn run_team_trials(
    teams_by_match: &TeamsByMatch,
    cheaters: &HashSet<AccountId>,
    plan: &TrialPlan,
) -> TeamEstimate {
    tracing::info!(
        "Running {} team shuffles over {} matches (seed {}, parallel={})",
        plan.num_trials,
        teams_by_match.len(),
        plan.seed,
        plan.parallel
    );
    let distributions = team_trial_distributions(teams_by_match, cheaters, plan);
    let buckets = std::array::from_fn(|bucket| {
        let counts: Vec<usize> = distributions.iter().map(|d| d.get(bucket)).collect();
        summarize(&counts)
    });
    TeamEstimate { buckets }
}
