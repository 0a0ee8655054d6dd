// Normal-approximation summary of randomized trial counts
//
// mean ± 1.96 · σ / √N, where σ is the population standard deviation
// (squared deviations divided by N, not N − 1).

use serde::Serialize;

/// z-value for a two-sided 95% confidence interval
pub const Z_95: f64 = 1.96;

/// Expected count under the null model, with its 95% confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Number of trials the estimate is based on
    pub trials: usize,
    pub mean: f64,
    /// Population standard deviation of the trial counts
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl Estimate {
    /// The degenerate estimate for zero trials
    pub fn empty() -> Self {
        Self {
            trials: 0,
            mean: 0.0,
            std_dev: 0.0,
            ci_lower: 0.0,
            ci_upper: 0.0,
        }
    }

    /// `(ci_lower, ci_upper)`
    pub fn interval(&self) -> (f64, f64) {
        (self.ci_lower, self.ci_upper)
    }

    /// Half the width of the confidence interval
    pub fn margin_of_error(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

/// Summarize trial counts into mean and 95% CI.
///
/// - N = 0: mean 0.0 and interval (0.0, 0.0)
/// - N = 1: interval collapses to the single count
///
/// # Example
/// ```
/// use contagion::montecarlo::summarize;
///
/// let estimate = summarize(&[2, 4, 6, 8]);
/// assert_eq!(estimate.mean, 5.0);
/// assert!((estimate.std_dev - 5.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn summarize(counts: &[usize]) -> Estimate {
    if counts.is_empty() {
        return Estimate::empty();
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;

    let (std_dev, margin) = if counts.len() > 1 {
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        (std_dev, Z_95 * std_dev / n.sqrt())
    } else {
        (0.0, 0.0)
    };

    Estimate {
        trials: counts.len(),
        mean,
        std_dev,
        ci_lower: mean - margin,
        ci_upper: mean + margin,
    }
}

/// Where the real count falls relative to the randomized baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// Real count strictly above the upper CI bound
    AboveChance,
    /// Real count inside the CI (bounds inclusive)
    WithinChance,
    /// Real count strictly below the lower CI bound
    BelowChance,
    /// No trials were run, so there is no baseline
    Inconclusive,
}

impl Significance {
    pub fn assess(real_count: usize, estimate: &Estimate) -> Self {
        if estimate.trials == 0 {
            return Significance::Inconclusive;
        }
        let real = real_count as f64;
        if real > estimate.ci_upper {
            Significance::AboveChance
        } else if real < estimate.ci_lower {
            Significance::BelowChance
        } else {
            Significance::WithinChance
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Significance::AboveChance => "above chance",
            Significance::WithinChance => "within chance",
            Significance::BelowChance => "below chance",
            Significance::Inconclusive => "inconclusive (no trials)",
        }
    }
}
