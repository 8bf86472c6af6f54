//! Snapshot log parsing.
//!
//! A snapshot log is the plain-text output of one probing run. Each account
//! observation is one line:
//!
//! ```text
//! 2024-03-01 09:15:02,311 Account alice@example.com touched. Quota: {...}, Space used: {'used': 1024.5, 'total': 51200} MB
//! ```
//!
//! Only lines containing the `Account` marker are observations; everything
//! else is ignored. An observation that does not match the line grammar is
//! an error, never skipped.

use chrono::NaiveDateTime;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, InputError, ParseError};

/// Marker substring that selects a line as an account observation.
pub const OBSERVATION_MARKER: &str = "Account";

static OBSERVATION_RE: OnceLock<Regex> = OnceLock::new();

fn observation_regex() -> &'static Regex {
    OBSERVATION_RE.get_or_init(|| {
        Regex::new(
            r#"Account\s+(?P<id>\S+).*?Space used:\s*\{\s*['"]?used['"]?\s*:(?P<used>[^,}]*),\s*['"]?total['"]?\s*:(?P<total>[^,}]*)\}"#,
        )
        .expect("observation regex is valid")
    })
}

/// Storage state of one account at one sampling run, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountUsage {
    pub used: f64,
    pub total: f64,
}

impl AccountUsage {
    pub fn new(used: f64, total: f64) -> Self {
        AccountUsage { used, total }
    }

    /// Space left under the quota. Negative when the account is over quota.
    pub fn remaining(&self) -> f64 {
        self.total - self.used
    }
}

/// Parsed state of every observed account, in first-seen order.
///
/// Re-inserting an identifier keeps its original position and replaces the
/// usage, so the last observation in a log wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, AccountUsage)>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Snapshot::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, usage: AccountUsage) {
        let identifier = identifier.into();
        if let Some(&pos) = self.index.get(&identifier) {
            self.entries[pos].1 = usage;
        } else {
            self.index.insert(identifier.clone(), self.entries.len());
            self.entries.push((identifier, usage));
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&AccountUsage> {
        self.index.get(identifier).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccountUsage)> {
        self.entries.iter().map(|(id, usage)| (id.as_str(), usage))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, AccountUsage)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (S, AccountUsage)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (identifier, usage) in iter {
            snapshot.insert(identifier, usage);
        }
        snapshot
    }
}

fn parse_amount(raw: &str, field: &'static str, line: usize) -> Result<f64, ParseError> {
    let cleaned = raw.trim().trim_matches(|c| c == '\'' || c == '"').trim();

    match cleaned.parse::<f64>() {
        // + 0.0 folds -0.0 into 0.0
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value + 0.0),
        _ => Err(ParseError::InvalidNumber {
            line,
            field,
            value: cleaned.to_string(),
        }),
    }
}

/// Parse a single log line. `line_no` is only used for error reporting.
///
/// Returns `Ok(None)` for lines that are not account observations.
pub fn parse_line(
    line: &str,
    line_no: usize,
) -> Result<Option<(String, AccountUsage)>, ParseError> {
    if !line.contains(OBSERVATION_MARKER) {
        return Ok(None);
    }

    let caps = observation_regex()
        .captures(line)
        .ok_or(ParseError::MissingUsage { line: line_no })?;

    let used = parse_amount(&caps["used"], "used", line_no)?;
    let total = parse_amount(&caps["total"], "total", line_no)?;

    Ok(Some((caps["id"].to_string(), AccountUsage::new(used, total))))
}

/// Parse the full text of a snapshot log.
pub fn parse_str(content: &str) -> Result<Snapshot, ParseError> {
    let mut snapshot = Snapshot::new();

    for (idx, line) in content.lines().enumerate() {
        if let Some((identifier, usage)) = parse_line(line, idx + 1)? {
            snapshot.insert(identifier, usage);
        }
    }

    Ok(snapshot)
}

/// Read and parse a snapshot log from disk.
pub fn load(path: &Path) -> Result<Snapshot, Error> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = parse_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("parsed {} accounts from {}", snapshot.len(), path.display());
    Ok(snapshot)
}

/// Render one observation line in the format the probe writes.
pub fn format_observation(
    timestamp: NaiveDateTime,
    identifier: &str,
    quota: &str,
    usage: &AccountUsage,
) -> String {
    format!(
        "{} Account {identifier} touched. Quota: {quota}, Space used: {{'used': {}, 'total': {}}} MB",
        timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
        usage.used,
        usage.total
    )
}
