//! Failure diagnostics produced while resolving features.

use crate::dependency::DependencyKind;
use fgate_domain::FeatureId;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Reason attached to every feature left over when the loop stops making progress.
pub const DEADLOCK_REASON: &str = "attempts to resolve this dependency resulted in a deadlock";

/// What produced a [`FailureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A single dependency's criterion was not met.
    Unsatisfied(DependencyKind),
    /// Synthetic record appended when the loop terminates without resolving the feature.
    Deadlock,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsatisfied(kind) => write!(f, "{kind}"),
            Self::Deadlock => f.write_str("deadlock"),
        }
    }
}

/// Immutable explanation of why a feature could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[error("feature '{feature}' [{kind}]: {reason}")]
pub struct FailureRecord {
    feature: FeatureId,
    kind: FailureKind,
    reason: Cow<'static, str>,
    causes: Vec<FailureRecord>,
}

impl FailureRecord {
    #[must_use]
    pub fn new(feature: FeatureId, kind: FailureKind, reason: impl Into<Cow<'static, str>>) -> Self {
        Self { feature, kind, reason: reason.into(), causes: Vec::new() }
    }

    pub(crate) fn unsatisfied(
        feature: &FeatureId,
        kind: DependencyKind,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(feature.clone(), FailureKind::Unsatisfied(kind), reason)
    }

    #[must_use]
    pub fn deadlock(feature: FeatureId) -> Self {
        Self::new(feature, FailureKind::Deadlock, DEADLOCK_REASON)
    }

    /// Attaches nested causes.
    #[must_use]
    pub fn with_causes(mut self, causes: impl IntoIterator<Item = Self>) -> Self {
        self.causes.extend(causes);
        self
    }

    #[must_use]
    pub const fn feature(&self) -> &FeatureId {
        &self.feature
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub fn causes(&self) -> &[Self] {
        &self.causes
    }

    #[must_use]
    pub const fn is_deadlock(&self) -> bool {
        matches!(self.kind, FailureKind::Deadlock)
    }
}

/// Insertion-ordered set of failures for one feature.
///
/// Equal records are kept once, so a diagnostic repeated across rounds is
/// neither lost nor duplicated. An empty set is the success signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FailureSet {
    records: Vec<FailureRecord>,
}

impl FailureSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Returns `false` if an equal record was already present.
    pub fn insert(&mut self, record: FailureRecord) -> bool {
        if self.records.contains(&record) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn contains(&self, record: &FailureRecord) -> bool {
        self.records.contains(record)
    }

    #[must_use]
    pub fn has_deadlock(&self) -> bool {
        self.records.iter().any(FailureRecord::is_deadlock)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FailureRecord> {
        self.records.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<FailureRecord> for FailureSet {
    fn extend<I: IntoIterator<Item = FailureRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<FailureRecord> for FailureSet {
    fn from_iter<I: IntoIterator<Item = FailureRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for FailureSet {
    type Item = FailureRecord;
    type IntoIter = std::vec::IntoIter<FailureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a FailureSet {
    type Item = &'a FailureRecord;
    type IntoIter = std::slice::Iter<'a, FailureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
