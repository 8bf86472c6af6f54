pub mod text;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, InputError};
use crate::snapshot::{self, AccountUsage, Snapshot};
use crate::store::diff::{self, ChangeSet};
use crate::store::LogPair;

/// Aggregate figures over the "after" snapshot, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub used_mb: f64,
    pub remaining_mb: f64,
}

impl Totals {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        snapshot.iter().fold(
            Totals {
                used_mb: 0.0,
                remaining_mb: 0.0,
            },
            |acc, (_, usage)| Totals {
                used_mb: acc.used_mb + usage.used,
                remaining_mb: acc.remaining_mb + usage.remaining(),
            },
        )
    }
}

/// A comparison between two snapshots, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub totals: Totals,
    pub changes: ChangeSet,
    after: Snapshot,
}

impl Report {
    /// Classify and aggregate. Both snapshots must contain at least one account.
    pub fn generate(before: &Snapshot, after: &Snapshot) -> Result<Report, InputError> {
        if before.is_empty() {
            return Err(InputError::EmptySnapshot { side: "before" });
        }
        if after.is_empty() {
            return Err(InputError::EmptySnapshot { side: "after" });
        }

        Ok(Report {
            totals: Totals::from_snapshot(after),
            changes: diff::compare_logs(before, after),
            after: after.clone(),
        })
    }

    /// Current usage of an account. `None` for removed accounts.
    pub fn current_usage(&self, identifier: &str) -> Option<&AccountUsage> {
        self.after.get(identifier)
    }
}

/// Write the rendered report to `dir/file_name`, creating `dir` if needed.
///
/// The text goes to a temporary file in `dir` that is renamed over the
/// target, so an existing report is either replaced whole or left untouched.
pub fn write(report: &Report, dir: &Path, file_name: &str) -> Result<PathBuf, Error> {
    let path = dir.join(file_name);
    let rendered = text::render(report);

    let write_err = |source: std::io::Error| Error::Write {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    staged
        .write_all(rendered.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(write_err)?;
    staged.persist(&path).map_err(|e| write_err(e.error))?;

    Ok(path)
}

/// Load both logs, compare them and write the report. Returns the report path.
pub fn run(config: &Config, pair: &LogPair) -> Result<PathBuf, Error> {
    let before = snapshot::load(&pair.before)?;
    let after = snapshot::load(&pair.after)?;

    let report = Report::generate(&before, &after)?;
    log::debug!(
        "classified {} accounts ({} before, {} after)",
        report.changes.len(),
        before.len(),
        after.len()
    );

    let path = write(
        &report,
        &config.report_dir,
        &pair.report_file_name(&config.naming),
    )?;
    log::info!("report written to {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(entries: &[(&str, f64, f64)]) -> Snapshot {
        entries
            .iter()
            .map(|&(id, used, total)| (id, AccountUsage::new(used, total)))
            .collect()
    }

    #[test]
    fn totals_come_from_after_snapshot() {
        let totals = Totals::from_snapshot(&snap(&[("a", 1024.0, 2048.0)]));
        assert_eq!(totals.used_mb, 1024.0);
        assert_eq!(totals.remaining_mb, 1024.0);
    }

    #[test]
    fn totals_sum_all_accounts() {
        let totals = Totals::from_snapshot(&snap(&[("a", 100.0, 1000.0), ("b", 300.0, 500.0)]));
        assert_eq!(totals.used_mb, 400.0);
        assert_eq!(totals.remaining_mb, 1100.0);
    }

    #[test]
    fn before_snapshot_not_aggregated() {
        let report = Report::generate(
            &snap(&[("gone", 9000.0, 9000.0)]),
            &snap(&[("a", 10.0, 20.0)]),
        )
        .unwrap();
        assert_eq!(report.totals.used_mb, 10.0);
        assert_eq!(report.totals.remaining_mb, 10.0);
        assert_eq!(report.current_usage("gone"), None);
    }

    #[test]
    fn empty_snapshot_rejected() {
        let full = snap(&[("a", 1.0, 2.0)]);

        let err = Report::generate(&Snapshot::new(), &full).unwrap_err();
        assert!(matches!(err, InputError::EmptySnapshot { side: "before" }));

        let err = Report::generate(&full, &Snapshot::new()).unwrap_err();
        assert!(matches!(err, InputError::EmptySnapshot { side: "after" }));
    }

    #[test]
    fn write_creates_report_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("logs").join("reports");
        let report = Report::generate(&snap(&[("a", 1.0, 2.0)]), &snap(&[("a", 1.0, 2.0)])).unwrap();

        let path = write(&report, &dir, "change_report_x_-_y.txt").unwrap();
        assert_eq!(path, dir.join("change_report_x_-_y.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text::render(&report));
    }

    #[test]
    fn write_replaces_existing_report_whole() {
        let tmp = tempfile::TempDir::new().unwrap();
        let stale = tmp.path().join("change_report_x_-_y.txt");
        std::fs::write(&stale, "stale report\n".repeat(500)).unwrap();

        let report = Report::generate(&snap(&[("a", 1.0, 2.0)]), &snap(&[("a", 1.0, 2.0)])).unwrap();
        let path = write(&report, tmp.path(), "change_report_x_-_y.txt").unwrap();

        assert_eq!(path, stale);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text::render(&report));

        // no staging files left behind
        let leftover: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftover.len(), 1);
    }
}
