//! Flat-file snapshot log storage.
//!
//! Each probing run writes one log into the log directory, named
//! `<prefix><%Y-%m-%d_%H-%M-%S><suffix>` (e.g. `megakeep_2024-03-01_09-15-00.log`).
//! The embedded timestamp is what orders runs; file mtimes are ignored.
//!
//! Supports:
//! - Building a log filename for a caller-supplied run timestamp
//! - Finding the most recent logs in a directory
//! - Picking the before/after pair for a comparison

pub mod diff;

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, InputError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Filename convention shared with the probe that writes the logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogNaming {
    pub prefix: String,
    pub suffix: String,
}

impl Default for LogNaming {
    fn default() -> Self {
        LogNaming {
            prefix: "megakeep_".to_string(),
            suffix: ".log".to_string(),
        }
    }
}

/// Filename for the log of a run started at `run_at`.
pub fn log_file_name(naming: &LogNaming, run_at: NaiveDateTime) -> String {
    format!(
        "{}{}{}",
        naming.prefix,
        run_at.format(TIMESTAMP_FORMAT),
        naming.suffix
    )
}

/// Extract the run timestamp from a log filename, if it follows the convention.
pub fn parse_log_timestamp(naming: &LogNaming, file_name: &str) -> Option<NaiveDateTime> {
    let stamp = file_name
        .strip_prefix(naming.prefix.as_str())?
        .strip_suffix(naming.suffix.as_str())?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Up to `limit` logs from `dir`, most recent first.
pub fn find_recent_logs(
    dir: &Path,
    naming: &LogNaming,
    limit: usize,
) -> std::io::Result<Vec<PathBuf>> {
    let mut logs: Vec<(NaiveDateTime, PathBuf)> = Vec::new();

    for dir_entry in std::fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match parse_log_timestamp(naming, file_name) {
            Some(run_at) => logs.push((run_at, path)),
            None => log::debug!("skipping {}: not a snapshot log name", path.display()),
        }
    }

    // newest first, filename breaks ties so the order is stable
    logs.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    Ok(logs.into_iter().take(limit).map(|(_, path)| path).collect())
}

/// The two snapshot logs being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPair {
    /// Older snapshot (S1)
    pub before: PathBuf,
    /// Newer snapshot (S2)
    pub after: PathBuf,
}

impl LogPair {
    pub fn new(before: impl Into<PathBuf>, after: impl Into<PathBuf>) -> Self {
        LogPair {
            before: before.into(),
            after: after.into(),
        }
    }

    /// `change_report_<before date>_-_<after date>.txt`
    pub fn report_file_name(&self, naming: &LogNaming) -> String {
        format!(
            "change_report_{}_-_{}.txt",
            log_date(naming, &self.before),
            log_date(naming, &self.after)
        )
    }
}

/// Date part of a log's run timestamp, or the file stem for names outside the convention.
fn log_date(naming: &LogNaming, path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match parse_log_timestamp(naming, &file_name) {
        Some(run_at) => run_at.format("%Y-%m-%d").to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(file_name),
    }
}

/// Pick the two most recent logs in `dir`: newest is `after`, the one before it is `before`.
pub fn discover_pair(dir: &Path, naming: &LogNaming) -> Result<LogPair, Error> {
    let logs = match find_recent_logs(dir, naming, 2) {
        Ok(logs) => logs,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(InputError::Unreadable {
                path: dir.to_path_buf(),
                source,
            }
            .into())
        }
    };

    match logs.as_slice() {
        [after, before] => {
            log::info!(
                "comparing {} -> {}",
                before.display(),
                after.display()
            );
            Ok(LogPair::new(before, after))
        }
        _ => Err(Error::Discovery {
            dir: dir.to_path_buf(),
            found: logs.len(),
        }),
    }
}
