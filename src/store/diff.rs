//! Snapshot comparison engine.
//!
//! Partitions every account seen in either snapshot into exactly one
//! change category. Category names follow the long-standing report
//! convention: an account whose used space went *down* is reported as
//! "content increased", and one whose used space went *up* as
//! "content decreased". Report consumers depend on these labels, so the
//! mapping is kept as-is.

use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    ContentIncreased,
    ContentDecreased,
    Unchanged,
}

impl ChangeKind {
    /// Fixed report order.
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::Added,
        ChangeKind::Removed,
        ChangeKind::ContentIncreased,
        ChangeKind::ContentDecreased,
        ChangeKind::Unchanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::ContentIncreased => "content_increased",
            ChangeKind::ContentDecreased => "content_decreased",
            ChangeKind::Unchanged => "unchanged",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Removed => "Removed",
            ChangeKind::ContentIncreased => "Content Increased",
            ChangeKind::ContentDecreased => "Content Decreased",
            ChangeKind::Unchanged => "Unchanged",
        }
    }
}

/// Accounts grouped by change category, each group in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub content_increased: Vec<String>,
    pub content_decreased: Vec<String>,
    pub unchanged: Vec<String>,
}

impl ChangeSet {
    pub fn accounts(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Removed => &self.removed,
            ChangeKind::ContentIncreased => &self.content_increased,
            ChangeKind::ContentDecreased => &self.content_decreased,
            ChangeKind::Unchanged => &self.unchanged,
        }
    }

    fn accounts_mut(&mut self, kind: ChangeKind) -> &mut Vec<String> {
        match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Removed => &mut self.removed,
            ChangeKind::ContentIncreased => &mut self.content_increased,
            ChangeKind::ContentDecreased => &mut self.content_decreased,
            ChangeKind::Unchanged => &mut self.unchanged,
        }
    }

    /// All categories in report order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (ChangeKind, &[String])> {
        ChangeKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.accounts(kind)))
    }

    /// Total number of classified accounts.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, accounts)| accounts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every account in `before` ∪ `after`.
pub fn compare_logs(before: &Snapshot, after: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (identifier, now) in after.iter() {
        let kind = match before.get(identifier) {
            None => ChangeKind::Added,
            Some(was) if now.used < was.used => ChangeKind::ContentIncreased,
            Some(was) if now.used > was.used => ChangeKind::ContentDecreased,
            Some(_) => ChangeKind::Unchanged,
        };
        changes.accounts_mut(kind).push(identifier.to_string());
    }

    for identifier in before.identifiers() {
        if !after.contains(identifier) {
            changes.removed.push(identifier.to_string());
        }
    }

    changes
}
