//! Text and JSON rendering of analysis results

use crate::hypothesis::{TeamDistribution, BUCKET_COUNT};
use crate::montecarlo::{Estimate, Significance, TeamEstimate, TrialPlan};
use serde::Serialize;
use std::fmt::Write as _;

/// Real vs. randomized outcome of one kill hypothesis
#[derive(Debug, Clone, Serialize)]
pub struct HypothesisReport {
    pub hypothesis: String,
    pub description: String,
    pub real_count: usize,
    pub expected: Estimate,
    pub significance: Significance,
}

impl HypothesisReport {
    pub fn new(
        hypothesis: &str,
        description: &str,
        real_count: usize,
        expected: Estimate,
    ) -> Self {
        Self {
            hypothesis: hypothesis.to_string(),
            description: description.to_string(),
            real_count,
            significance: Significance::assess(real_count, &expected),
            expected,
        }
    }
}

/// Real vs. randomized cheater-per-team distribution
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub real: TeamDistribution,
    pub expected: TeamEstimate,
    pub significance: [Significance; BUCKET_COUNT],
}

impl TeamReport {
    pub fn new(real: TeamDistribution, expected: TeamEstimate) -> Self {
        let significance = std::array::from_fn(|bucket| {
            Significance::assess(real.get(bucket), expected.get(bucket))
        });
        Self {
            real,
            expected,
            significance,
        }
    }
}

/// Sizes of the loaded inputs
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill_events: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheater_records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_rows: Option<usize>,
}

/// Everything produced by one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub trials: TrialPlan,
    pub data: DataSummary,
    pub hypotheses: Vec<HypothesisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<TeamReport>,
}

fn bucket_label(bucket: usize) -> String {
    match bucket {
        1 => "1 cheater".to_string(),
        b if b == BUCKET_COUNT - 1 => format!("{b}+ cheaters"),
        b => format!("{b} cheaters"),
    }
}

impl AnalysisReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        for hypothesis in &self.hypotheses {
            let e = &hypothesis.expected;
            let _ = writeln!(report, "=== {} ===", hypothesis.description);
            let _ = writeln!(report, "REAL WORLD SCENARIO");
            let _ = writeln!(report, "Count: {}\n", hypothesis.real_count);
            let _ = writeln!(
                report,
                "RANDOMIZED WORLDS SCENARIO ({} trials, seed {})",
                e.trials, self.trials.seed
            );
            let _ = writeln!(
                report,
                "Expected count = {:.2}, 95% CI = [{:.2}, {:.2}]",
                e.mean, e.ci_lower, e.ci_upper
            );
            let _ = writeln!(report, "Real count is {}\n", hypothesis.significance.label());
        }

        if let Some(teams) = &self.teams {
            let _ = writeln!(report, "=== Cheaters per team ===");
            let _ = writeln!(report, "REAL WORLD SCENARIO:");
            for bucket in 0..BUCKET_COUNT {
                let _ = writeln!(
                    report,
                    " Teams with {:<12} {}",
                    format!("{}:", bucket_label(bucket)),
                    teams.real.get(bucket)
                );
            }
            let _ = writeln!(report);
            let _ = writeln!(
                report,
                "RANDOMIZED WORLDS SCENARIO ({} trials, seed {}):",
                teams.expected.get(0).trials,
                self.trials.seed
            );
            for bucket in 0..BUCKET_COUNT {
                let e = teams.expected.get(bucket);
                let _ = writeln!(
                    report,
                    " Teams with {:<12} {:.2}, 95% CI: [{:.2}, {:.2}] ({})",
                    format!("{}:", bucket_label(bucket)),
                    e.mean,
                    e.ci_lower,
                    e.ci_upper,
                    teams.significance[bucket].label()
                );
            }
        }

        report
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
