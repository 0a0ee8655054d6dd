//! CLI argument parsing for contagion

use crate::config::AnalysisConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Which hypotheses to test
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Analysis {
    /// Victims of active cheaters who later cheat
    Victims,
    /// Observers of a cheater's kill streak who later cheat
    Observers,
    /// Distribution of cheaters across teams
    Teams,
    /// All of the above
    All,
}

impl Analysis {
    pub fn includes_victims(self) -> bool {
        matches!(self, Analysis::Victims | Analysis::All)
    }

    pub fn includes_observers(self) -> bool {
        matches!(self, Analysis::Observers | Analysis::All)
    }

    pub fn includes_teams(self) -> bool {
        matches!(self, Analysis::Teams | Analysis::All)
    }

    /// True if the kill file is needed
    pub fn needs_kills(self) -> bool {
        self.includes_victims() || self.includes_observers()
    }
}

#[derive(Parser, Debug)]
#[command(name = "contagion")]
#[command(version)]
#[command(
    about = "Permutation tests for social contagion of cheating in match logs",
    long_about = None
)]
pub struct Cli {
    /// Hypothesis to test
    #[arg(value_enum, default_value = "all")]
    pub analysis: Analysis,

    /// Kill file (match_id, killer_id, victim_id, kill_timestamp)
    #[arg(short = 'k', long = "kills", value_name = "FILE")]
    pub kills: Option<PathBuf>,

    /// Cheater file (account_id, cheat_start_date, account_ban_date)
    #[arg(short = 'c', long = "cheaters", value_name = "FILE")]
    pub cheaters: Option<PathBuf>,

    /// Team file (match_id, account_id, team_id)
    #[arg(short = 't', long = "teams", value_name = "FILE")]
    pub teams: Option<PathBuf>,

    /// Number of randomized worlds (default: 100)
    #[arg(short = 'n', long = "shuffles", value_name = "N")]
    pub shuffles: Option<usize>,

    /// Base random seed for reproducible runs
    #[arg(short = 's', long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Fail on malformed input lines instead of skipping them
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Overlay command-line values on a file configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(kills) = &self.kills {
            config.inputs.kills = Some(kills.clone());
        }
        if let Some(cheaters) = &self.cheaters {
            config.inputs.cheaters = Some(cheaters.clone());
        }
        if let Some(teams) = &self.teams {
            config.inputs.teams = Some(teams.clone());
        }
        if self.strict {
            config.inputs.strict = true;
        }
        if let Some(shuffles) = self.shuffles {
            config.trials.num_trials = shuffles;
        }
        if let Some(seed) = self.seed {
            config.trials.seed = Some(seed);
        }
        if self.parallel {
            config.trials.parallel = true;
        }
    }
}
