// Configuration for Monte Carlo permutation trials

use serde::{Deserialize, Serialize};

/// Upper bound on trials per run; each trial copies every match
pub const MAX_TRIALS: usize = 1_000_000;

/// How many randomized worlds to build and how to seed them
///
/// # Example
/// ```
/// use contagion::montecarlo::TrialConfig;
///
/// let config = TrialConfig::default();
/// assert_eq!(config.num_trials, 100);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrialConfig {
    /// Number of randomized trials (N)
    ///
    /// Zero is allowed: no trials are run and the estimate collapses to 0.
    pub num_trials: usize,

    /// Base seed; trial `i` is seeded with `seed + i`
    ///
    /// When unset, a base seed is drawn from entropy once per run and
    /// reported alongside the results.
    pub seed: Option<u64>,

    /// Run trials on the rayon thread pool
    ///
    /// Results are identical to a sequential run with the same seed.
    pub parallel: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            num_trials: 100,
            seed: None,
            parallel: false,
        }
    }
}

impl TrialConfig {
    /// Create a seeded sequential configuration
    pub fn seeded(num_trials: usize, seed: u64) -> Self {
        Self {
            num_trials,
            seed: Some(seed),
            parallel: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.num_trials > MAX_TRIALS {
            return Err(format!(
                "num_trials must be <= {}, got {}",
                MAX_TRIALS, self.num_trials
            ));
        }
        Ok(())
    }

    /// The base seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
