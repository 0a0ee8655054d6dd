//! Loading of the tab-separated cheater, team and kill files
//!
//! File formats (no header row, one record per line):
//! - cheaters: `account_id \t cheat_start_date \t account_ban_date`
//! - teams:    `match_id \t account_id \t team_id`
//! - kills:    `match_id \t killer_id \t victim_id \t kill_timestamp`
//!
//! Each line is stripped of surrounding whitespace, tabs included, before it
//! is split into columns, and blank lines are ignored. What happens to
//! malformed lines is decided by [`LoadPolicy`].

use crate::error::{LoadError, RecordError};
use crate::records::{AccountId, CheatStartDates, KillEvent, KillLog, MatchId, TeamAssignment};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// How malformed lines are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Skip the line and log a warning
    #[default]
    Lenient,
    /// Fail on the first malformed line
    Strict,
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse a `YYYY-MM-DD HH:MM:SS.ffffff` timestamp (fractional part optional)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, RecordError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        RecordError::InvalidTimestamp {
            value: value.to_string(),
        }
    })
}

/// Parse one cheater line into `(account, cheat_start_date)`.
///
/// Only the first two columns are used; the ban date is ignored.
pub fn parse_cheater_record(line: &str) -> Result<(AccountId, NaiveDate), RecordError> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < 2 {
        return Err(RecordError::TooFewColumns {
            expected: 2,
            found: parts.len(),
        });
    }
    Ok((parts[0].to_string(), parse_date(parts[1])?))
}

/// Parse one team line into a [`TeamAssignment`]
pub fn parse_team_record(line: &str) -> Result<TeamAssignment, RecordError> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() != 3 {
        return Err(RecordError::ColumnCount {
            expected: 3,
            found: parts.len(),
        });
    }
    Ok(TeamAssignment::new(parts[0], parts[1], parts[2]))
}

/// Parse one kill line into `(match_id, event)`. Extra columns are ignored.
pub fn parse_kill_record(line: &str) -> Result<(MatchId, KillEvent), RecordError> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < 4 {
        return Err(RecordError::TooFewColumns {
            expected: 4,
            found: parts.len(),
        });
    }
    let time = parse_timestamp(parts[3])?;
    Ok((parts[0].to_string(), KillEvent::new(parts[1], parts[2], time)))
}

/// Load cheat start dates keyed by account.
///
/// If an account appears more than once, the last line wins.
pub fn load_cheater_start_dates(
    path: &Path,
    policy: LoadPolicy,
) -> Result<CheatStartDates, LoadError> {
    let mut cheat_start = CheatStartDates::new();
    let mut duplicates = 0usize;
    scan_file(path, policy, |line| {
        let (account, date) = parse_cheater_record(line)?;
        if cheat_start.insert(account, date).is_some() {
            duplicates += 1;
        }
        Ok(())
    })?;

    if duplicates > 0 {
        tracing::warn!(
            "{}: {} accounts listed more than once, keeping the last start date",
            path.display(),
            duplicates
        );
    }
    tracing::debug!("Loaded {} cheat start dates from {}", cheat_start.len(), path.display());
    Ok(cheat_start)
}

/// Load kill events grouped by match plus each match's earliest kill time
pub fn load_kills(path: &Path, policy: LoadPolicy) -> Result<KillLog, LoadError> {
    let mut log = KillLog::new();
    scan_file(path, policy, |line| {
        let (match_id, event) = parse_kill_record(line)?;
        log.push(&match_id, event);
        Ok(())
    })?;

    tracing::debug!(
        "Loaded {} kills in {} matches from {}",
        log.event_count(),
        log.match_count(),
        path.display()
    );
    Ok(log)
}

/// Read the set of cheater accounts (first column of the cheater file)
pub fn read_cheaters(path: &Path) -> Result<HashSet<AccountId>, LoadError> {
    let mut cheaters = HashSet::new();
    scan_file(path, LoadPolicy::Lenient, |line| {
        if let Some(account) = line.trim().split('\t').next() {
            cheaters.insert(account.to_string());
        }
        Ok(())
    })?;

    tracing::debug!("Read {} cheater accounts from {}", cheaters.len(), path.display());
    Ok(cheaters)
}

/// Read team rows; lines without exactly three columns are malformed
pub fn read_teams(path: &Path, policy: LoadPolicy) -> Result<Vec<TeamAssignment>, LoadError> {
    let mut teams = Vec::new();
    scan_file(path, policy, |line| {
        teams.push(parse_team_record(line)?);
        Ok(())
    })?;

    tracing::debug!("Read {} team rows from {}", teams.len(), path.display());
    Ok(teams)
}

fn scan_file<F>(path: &Path, policy: LoadPolicy, handle: F) -> Result<usize, LoadError>
where
    F: FnMut(&str) -> Result<(), RecordError>,
{
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    scan_records(BufReader::new(file), path, policy, handle)
}

/// Feed every non-blank line to `handle`, returning the number of skipped lines
pub(crate) fn scan_records<R, F>(
    reader: R,
    path: &Path,
    policy: LoadPolicy,
    mut handle: F,
) -> Result<usize, LoadError>
where
    R: BufRead,
    F: FnMut(&str) -> Result<(), RecordError>,
{
    let mut skipped = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }

        if let Err(source) = handle(record) {
            let line_no = index + 1;
            match policy {
                LoadPolicy::Strict => {
                    return Err(LoadError::MalformedRecord {
                        path: path.to_path_buf(),
                        line: line_no,
                        source,
                    });
                }
                LoadPolicy::Lenient => {
                    tracing::warn!(
                        "{}:{}: skipping malformed record: {}",
                        path.display(),
                        line_no,
                        source
                    );
                    skipped += 1;
                }
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("{}: skipped {} malformed lines", path.display(), skipped);
    }
    Ok(skipped)
}
