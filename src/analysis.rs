//! Analysis driver: load inputs, evaluate on real data, run randomized trials
//!
//! The same seed plan is shared by every hypothesis in a run, so a report can
//! be reproduced by re-running with the seed it prints.

use crate::cli::Analysis;
use crate::config::AnalysisConfig;
use crate::hypothesis::{
    cheater_distribution, KillHypothesis, ObserverTurnsCheater, VictimTurnsCheater,
};
use crate::loader::{load_cheater_start_dates, load_kills, read_cheaters, read_teams};
use crate::montecarlo::{run_team_trials, run_trials, TrialPlan};
use crate::records::{group_teams_by_match, AccountId, CheatStartDates, KillLog, TeamAssignment};
use crate::report::{AnalysisReport, DataSummary, HypothesisReport, TeamReport};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Count of `hypothesis` on the real (non-randomized) data
pub fn evaluate_real<H>(hypothesis: &H, log: &KillLog, cheat_start: &CheatStartDates) -> usize
where
    H: KillHypothesis + ?Sized,
{
    hypothesis.count(&log.kills_by_match, &log.match_start, cheat_start)
}

/// Real count and randomized baseline for one kill hypothesis
pub fn analyze_kill_hypothesis<H>(
    hypothesis: &H,
    log: &KillLog,
    cheat_start: &CheatStartDates,
    plan: &TrialPlan,
) -> HypothesisReport
where
    H: KillHypothesis + ?Sized,
{
    let real_count = evaluate_real(hypothesis, log, cheat_start);
    tracing::info!("'{}': real count {}", hypothesis.name(), real_count);
    let expected = run_trials(hypothesis, log, cheat_start, plan);
    HypothesisReport::new(hypothesis.name(), hypothesis.description(), real_count, expected)
}

/// Real and randomized cheater-per-team distributions
pub fn analyze_team_distribution(
    assignments: &[TeamAssignment],
    cheaters: &HashSet<AccountId>,
    plan: &TrialPlan,
) -> TeamReport {
    let real = cheater_distribution(assignments, cheaters);
    tracing::info!("Real team distribution: {:?}", real.teams);
    let expected = run_team_trials(&group_teams_by_match(assignments), cheaters, plan);
    TeamReport::new(real, expected)
}

fn require<'a>(path: &'a Option<PathBuf>, flag: &str, analysis: Analysis) -> Result<&'a Path> {
    match path {
        Some(path) => Ok(path.as_path()),
        None => anyhow::bail!(
            "{} is required for the {:?} analysis",
            flag,
            analysis
        ),
    }
}

/// Run the selected analyses end to end
pub fn run(analysis: Analysis, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let inputs = &config.inputs;
    let policy = inputs.policy();
    let cheaters_path = require(&inputs.cheaters, "--cheaters", analysis)?;
    let plan = TrialPlan::from(&config.trials);
    tracing::info!(
        "Starting {:?} analysis: {} trials, seed {}",
        analysis,
        plan.num_trials,
        plan.seed
    );

    let mut data = DataSummary::default();
    let mut hypotheses = Vec::new();

    if analysis.needs_kills() {
        let kills_path = require(&inputs.kills, "--kills", analysis)?;
        let log = load_kills(kills_path, policy)
            .with_context(|| format!("Failed to load kills from {}", kills_path.display()))?;
        let cheat_start = load_cheater_start_dates(cheaters_path, policy).with_context(|| {
            format!("Failed to load cheaters from {}", cheaters_path.display())
        })?;
        data.matches = Some(log.match_count());
        data.kill_events = Some(log.event_count());
        data.cheater_records = Some(cheat_start.len());

        let mut selected: Vec<Box<dyn KillHypothesis>> = Vec::new();
        if analysis.includes_victims() {
            selected.push(Box::new(VictimTurnsCheater));
        }
        if analysis.includes_observers() {
            selected.push(Box::new(ObserverTurnsCheater::default()));
        }
        for hypothesis in &selected {
            hypotheses.push(analyze_kill_hypothesis(
                hypothesis.as_ref(),
                &log,
                &cheat_start,
                &plan,
            ));
        }
    }

    let teams = if analysis.includes_teams() {
        let teams_path = require(&inputs.teams, "--teams", analysis)?;
        let cheaters = read_cheaters(cheaters_path).with_context(|| {
            format!("Failed to load cheaters from {}", cheaters_path.display())
        })?;
        let assignments = read_teams(teams_path, policy)
            .with_context(|| format!("Failed to load teams from {}", teams_path.display()))?;
        data.team_rows = Some(assignments.len());
        data.cheater_records.get_or_insert(cheaters.len());

        Some(analyze_team_distribution(&assignments, &cheaters, &plan))
    } else {
        None
    };

    tracing::info!("Finished {:?} analysis: {:?}", analysis, data);
    Ok(AnalysisReport {
        trials: plan,
        data,
        hypotheses,
        teams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_timestamp;
    use crate::records::KillEvent;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_evaluate_real_victim_scenario() {
        let mut log = KillLog::new();
        log.push(
            "m1",
            KillEvent::new("x", "y", parse_timestamp("2020-01-05 08:00:00.000000").unwrap()),
        );
        log.push(
            "m1",
            KillEvent::new("k", "v", parse_timestamp("2020-01-10 10:00:00.000000").unwrap()),
        );
        let cheat_start: CheatStartDates = [
            ("k".to_string(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            ("v".to_string(), NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()),
        ]
        .into_iter()
        .collect();

        assert_eq!(evaluate_real(&VictimTurnsCheater, &log, &cheat_start), 1);
    }

    #[test]
    fn test_run_requires_cheaters() {
        let config = AnalysisConfig::default();
        let err = run(Analysis::Victims, &config).unwrap_err();
        assert!(err.to_string().contains("--cheaters"));
    }

    #[test]
    fn test_run_requires_teams_for_team_analysis() {
        let dir = TempDir::new().unwrap();
        let mut config = AnalysisConfig::default();
        config.inputs.cheaters = Some(write(&dir, "cheaters.txt", "a\t2020-01-01\t\n"));

        let err = run(Analysis::Teams, &config).unwrap_err();
        assert!(err.to_string().contains("--teams"));
    }

    #[test]
    fn test_run_all_end_to_end() {
        let dir = TempDir::new().unwrap();
        let mut config = AnalysisConfig::default();
        config.inputs.kills = Some(write(
            &dir,
            "kills.txt",
            "m1\tc\tv1\t2020-01-05 10:00:00.000000\n\
             m1\tc\tv2\t2020-01-05 10:05:00.000000\n\
             m1\tc\tv3\t2020-01-05 10:10:00.000000\n\
             m1\tc\ta\t2020-01-05 10:15:00.000000\n",
        ));
        config.inputs.cheaters = Some(write(
            &dir,
            "cheaters.txt",
            "c\t2020-01-01\t2020-03-01\na\t2020-01-10\t2020-03-01\n",
        ));
        config.inputs.teams = Some(write(
            &dir,
            "teams.txt",
            "m1\tc\tA\nm1\ta\tA\nm1\tv1\tB\nm1\tv2\tB\n",
        ));
        config.trials.num_trials = 20;
        config.trials.seed = Some(3);

        let report = run(Analysis::All, &config).unwrap();

        assert_eq!(report.trials.seed, 3);
        assert_eq!(report.hypotheses.len(), 2);
        assert_eq!(report.hypotheses[0].hypothesis, "victims");
        assert_eq!(report.hypotheses[0].real_count, 1);
        assert_eq!(report.hypotheses[1].hypothesis, "observers");
        assert_eq!(report.hypotheses[1].real_count, 1);
        assert_eq!(report.hypotheses[1].expected.trials, 20);

        let teams = report.teams.unwrap();
        assert_eq!(teams.real.teams, [1, 0, 1, 0, 0]);
        assert_eq!(report.data.matches, Some(1));
        assert_eq!(report.data.kill_events, Some(4));
        assert_eq!(report.data.team_rows, Some(4));
    }
}
