//! Plain-text change report.
//!
//! Layout:
//! - Header and aggregate totals (GB, two decimals)
//! - Summary with one count line per non-empty category
//! - One detail section per non-empty category, listing each account's
//!   current used/remaining space
//!
//! Empty categories are left out entirely. Removed accounts have no current
//! figures and show `N/A`.

use super::Report;
use crate::util::format_gb;

pub const TITLE: &str = "MegaKeep Account Changes Report";

/// Stand-in for per-account figures that don't exist in the after snapshot.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn render(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("{TITLE}\n\n"));
    output.push_str(&format!(
        "Total space used: {}\n",
        format_gb(report.totals.used_mb)
    ));
    output.push_str(&format!(
        "Total space available: {}\n\n",
        format_gb(report.totals.remaining_mb)
    ));

    output.push_str("Summary:\n");
    for (kind, accounts) in report.changes.iter() {
        if accounts.is_empty() {
            continue;
        }
        output.push_str(&format!("\t{}: {} accounts\n", kind.label(), accounts.len()));
    }

    for (kind, accounts) in report.changes.iter() {
        if accounts.is_empty() {
            continue;
        }

        output.push_str(&format!("\n{}:\n", kind.label()));
        for identifier in accounts {
            let (used, remaining) = match report.current_usage(identifier) {
                Some(usage) => (format_gb(usage.used), format_gb(usage.remaining())),
                None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
            };
            output.push_str(&format!(
                "\t{identifier} - Space used: {used}, Space remaining: {remaining}\n"
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{AccountUsage, Snapshot};

    fn snap(entries: &[(&str, f64, f64)]) -> Snapshot {
        entries
            .iter()
            .map(|&(id, used, total)| (id, AccountUsage::new(used, total)))
            .collect()
    }

    #[test]
    fn full_report_layout() {
        let before = snap(&[("a@x.com", 512.0, 2048.0), ("b@x.com", 100.0, 1024.0)]);
        let after = snap(&[("b@x.com", 1024.0, 1024.0), ("c@x.com", 1024.0, 2048.0)]);
        let report = Report::generate(&before, &after).unwrap();

        let expected = "\
MegaKeep Account Changes Report

Total space used: 2.00 GB
Total space available: 1.00 GB

Summary:
\tAdded: 1 accounts
\tRemoved: 1 accounts
\tContent Decreased: 1 accounts

Added:
\tc@x.com - Space used: 1.00 GB, Space remaining: 1.00 GB

Removed:
\ta@x.com - Space used: N/A, Space remaining: N/A

Content Decreased:
\tb@x.com - Space used: 1.00 GB, Space remaining: 0.00 GB
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn empty_categories_omitted() {
        let same = snap(&[("a@x.com", 1024.0, 2048.0)]);
        let report = Report::generate(&same, &same).unwrap();
        let rendered = render(&report);

        assert!(rendered.contains("\tUnchanged: 1 accounts\n"));
        assert!(rendered.contains("\nUnchanged:\n\ta@x.com"));
        for label in ["Added", "Removed", "Content Increased", "Content Decreased"] {
            assert!(!rendered.contains(label), "{label} should be omitted");
        }
    }

    #[test]
    fn content_increased_section_for_shrinking_usage() {
        let report = Report::generate(
            &snap(&[("a@x.com", 2048.0, 4096.0)]),
            &snap(&[("a@x.com", 1536.0, 4096.0)]),
        )
        .unwrap();
        let rendered = render(&report);

        assert!(rendered.contains(
            "\nContent Increased:\n\ta@x.com - Space used: 1.50 GB, Space remaining: 2.50 GB\n"
        ));
    }
}
