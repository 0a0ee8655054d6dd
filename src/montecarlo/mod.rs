// Monte Carlo permutation testing
//
// The null model keeps every match's structure (who-killed-whom slots, kill
// timestamps, team sizes) and only permutes identities within a match. The
// real count of a hypothesis is compared against the distribution of counts
// over N such randomized worlds, summarized by a normal-approximation 95% CI.
//
// Trials share only read-only base data; every trial builds its own
// randomized copy with its own seeded RNG.

mod config;
mod runner;
mod statistics;

pub use config::{TrialConfig, MAX_TRIALS};
pub use runner::{
    kill_trial_counts, run_team_trials, run_trials, team_trial_distributions, TeamEstimate,
    TrialPlan,
};
pub use statistics::{summarize, Estimate, Significance, Z_95};
