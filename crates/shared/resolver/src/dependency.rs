//! The dependency contract.
//!
//! Every variant evaluates against a context and, on success, has the
//! satisfying payload recorded through `accept_output`. A failed evaluation
//! yields a [`FailureRecord`] naming the owning feature.

use crate::failure::FailureRecord;
use crate::feature::CandidatePool;
use fgate_domain::{FeatureFlag, FeatureId, FeatureSelector, FlagSelector, FlagSet};
use serde::Serialize;
use std::fmt;

/// Discriminant of a [`Dependency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Flag,
    Feature,
    DependsOnOneOf,
    Yields,
    YieldsTo,
    IncludesExactlyOneOf,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "flag",
            Self::Feature => "feature",
            Self::DependsOnOneOf => "depends_on_one_of",
            Self::Yields => "yields",
            Self::YieldsTo => "yields_to",
            Self::IncludesExactlyOneOf => "includes_exactly_one_of",
        })
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Requires a flag compatible with the selector to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDependency {
    flag: FlagSelector,
    satisfied_by: Option<Vec<FeatureFlag>>,
}

impl FlagDependency {
    #[must_use]
    pub const fn new(flag: FlagSelector) -> Self {
        Self { flag, satisfied_by: None }
    }

    #[must_use]
    pub const fn selector(&self) -> &FlagSelector {
        &self.flag
    }

    /// Succeeds with every compatible flag, in flag-set order.
    pub fn evaluate(&self, owner: &FeatureId, flags: &FlagSet) -> Result<Vec<FeatureFlag>, FailureRecord> {
        let found: Vec<FeatureFlag> = flags.matching(&self.flag).cloned().collect();
        if found.is_empty() {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::Flag,
                format!("flag '{}' is not set", self.flag),
            ));
        }
        Ok(found)
    }

    pub fn accept_output(&mut self, flags: Vec<FeatureFlag>) {
        self.satisfied_by = Some(flags);
    }

    #[must_use]
    pub fn satisfied_by(&self) -> Option<&[FeatureFlag]> {
        self.satisfied_by.as_deref()
    }
}

/// Requires a feature matching the selector to be resolved or already active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDependency {
    target: FeatureSelector,
    satisfied_by: Option<Vec<FeatureId>>,
}

impl FeatureDependency {
    #[must_use]
    pub const fn new(target: FeatureSelector) -> Self {
        Self { target, satisfied_by: None }
    }

    #[must_use]
    pub const fn target(&self) -> &FeatureSelector {
        &self.target
    }

    pub fn evaluate(&self, owner: &FeatureId, pool: &CandidatePool<'_>) -> Result<Vec<FeatureId>, FailureRecord> {
        let found: Vec<FeatureId> = pool.matching(&self.target).cloned().collect();
        if found.is_empty() {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::Feature,
                format!("no feature matching '{}' is {}", self.target, pool.scope()),
            ));
        }
        Ok(found)
    }

    pub fn accept_output(&mut self, features: Vec<FeatureId>) {
        self.satisfied_by = Some(features);
    }

    #[must_use]
    pub fn satisfied_by(&self) -> Option<&[FeatureId]> {
        self.satisfied_by.as_deref()
    }
}

/// Requires any one of several features to be resolved or already active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependsOnOneOf {
    targets: Vec<FeatureSelector>,
    satisfied_by: Option<Vec<FeatureId>>,
}

impl DependsOnOneOf {
    pub fn new(targets: impl IntoIterator<Item = FeatureSelector>) -> Self {
        Self { targets: targets.into_iter().collect(), satisfied_by: None }
    }

    #[must_use]
    pub fn targets(&self) -> &[FeatureSelector] {
        &self.targets
    }

    /// Succeeds with every pool member matched by any alternative.
    pub fn evaluate(&self, owner: &FeatureId, pool: &CandidatePool<'_>) -> Result<Vec<FeatureId>, FailureRecord> {
        if self.targets.is_empty() {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::DependsOnOneOf,
                "no alternatives were declared",
            ));
        }

        let found = pool.matching_any(&self.targets);
        if found.is_empty() {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::DependsOnOneOf,
                format!("none of [{}] is {}", join(&self.targets), pool.scope()),
            ));
        }
        Ok(found)
    }

    pub fn accept_output(&mut self, features: Vec<FeatureId>) {
        self.satisfied_by = Some(features);
    }

    /// Only matches among already-active features are recorded; a success
    /// carried by resolved features alone records an empty list.
    #[must_use]
    pub fn satisfied_by(&self) -> Option<&[FeatureId]> {
        self.satisfied_by.as_deref()
    }
}

/// Succeeds only during a yielding round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Yields {
    yielded: bool,
}

impl Yields {
    #[must_use]
    pub const fn new() -> Self {
        Self { yielded: false }
    }

    pub fn evaluate(&self, owner: &FeatureId, yielding: bool) -> Result<(), FailureRecord> {
        if yielding {
            return Ok(());
        }
        Err(FailureRecord::unsatisfied(owner, DependencyKind::Yields, "waiting for a yielding round"))
    }

    pub fn accept_output(&mut self, (): ()) {
        self.yielded = true;
    }

    #[must_use]
    pub const fn yielded(&self) -> bool {
        self.yielded
    }
}

/// Succeeds only during a yielding round, and only once a matching feature
/// is resolved or already active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldsTo {
    target: FeatureSelector,
    satisfied_by: Option<Vec<FeatureId>>,
}

impl YieldsTo {
    #[must_use]
    pub const fn new(target: FeatureSelector) -> Self {
        Self { target, satisfied_by: None }
    }

    #[must_use]
    pub const fn target(&self) -> &FeatureSelector {
        &self.target
    }

    pub fn evaluate(
        &self,
        owner: &FeatureId,
        yielding: bool,
        pool: &CandidatePool<'_>,
    ) -> Result<Vec<FeatureId>, FailureRecord> {
        if !yielding {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::YieldsTo,
                format!("waiting for a yielding round before checking '{}'", self.target),
            ));
        }

        let found: Vec<FeatureId> = pool.matching(&self.target).cloned().collect();
        if found.is_empty() {
            return Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::YieldsTo,
                format!("yielded, but no feature matching '{}' is {}", self.target, pool.scope()),
            ));
        }
        Ok(found)
    }

    pub fn accept_output(&mut self, features: Vec<FeatureId>) {
        self.satisfied_by = Some(features);
    }

    #[must_use]
    pub fn satisfied_by(&self) -> Option<&[FeatureId]> {
        self.satisfied_by.as_deref()
    }
}

/// Requires exactly one flag from a list to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludesExactlyOneOf {
    flags: Vec<FlagSelector>,
    satisfied_by: Option<FeatureFlag>,
}

impl IncludesExactlyOneOf {
    pub fn new(flags: impl IntoIterator<Item = FlagSelector>) -> Self {
        Self { flags: flags.into_iter().collect(), satisfied_by: None }
    }

    #[must_use]
    pub fn selectors(&self) -> &[FlagSelector] {
        &self.flags
    }

    /// Counts each present flag once, even when several selectors accept it.
    pub fn evaluate(&self, owner: &FeatureId, flags: &FlagSet) -> Result<FeatureFlag, FailureRecord> {
        let present: Vec<&FeatureFlag> =
            flags.iter().filter(|flag| self.flags.iter().any(|s| s.matches(flag))).collect();

        match present.as_slice() {
            [single] => Ok((*single).clone()),
            [] => Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::IncludesExactlyOneOf,
                format!("none of [{}] is set; exactly one is required", join(&self.flags)),
            )),
            many => Err(FailureRecord::unsatisfied(
                owner,
                DependencyKind::IncludesExactlyOneOf,
                format!(
                    "{} of [{}] are set ({}); exactly one is required",
                    many.len(),
                    join(&self.flags),
                    join(many),
                ),
            )),
        }
    }

    pub fn accept_output(&mut self, flag: FeatureFlag) {
        self.satisfied_by = Some(flag);
    }

    #[must_use]
    pub const fn satisfied_by(&self) -> Option<&FeatureFlag> {
        self.satisfied_by.as_ref()
    }
}

/// A declared requirement of a feature. The set of variants is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    Flag(FlagDependency),
    Feature(FeatureDependency),
    DependsOnOneOf(DependsOnOneOf),
    Yields(Yields),
    YieldsTo(YieldsTo),
    IncludesExactlyOneOf(IncludesExactlyOneOf),
}

impl Dependency {
    #[must_use]
    pub const fn flag(flag: FlagSelector) -> Self {
        Self::Flag(FlagDependency::new(flag))
    }

    #[must_use]
    pub const fn feature(target: FeatureSelector) -> Self {
        Self::Feature(FeatureDependency::new(target))
    }

    pub fn one_of(targets: impl IntoIterator<Item = FeatureSelector>) -> Self {
        Self::DependsOnOneOf(DependsOnOneOf::new(targets))
    }

    #[must_use]
    pub const fn yields() -> Self {
        Self::Yields(Yields::new())
    }

    #[must_use]
    pub const fn yields_to(target: FeatureSelector) -> Self {
        Self::YieldsTo(YieldsTo::new(target))
    }

    pub fn exactly_one_of(flags: impl IntoIterator<Item = FlagSelector>) -> Self {
        Self::IncludesExactlyOneOf(IncludesExactlyOneOf::new(flags))
    }

    #[must_use]
    pub const fn kind(&self) -> DependencyKind {
        match self {
            Self::Flag(_) => DependencyKind::Flag,
            Self::Feature(_) => DependencyKind::Feature,
            Self::DependsOnOneOf(_) => DependencyKind::DependsOnOneOf,
            Self::Yields(_) => DependencyKind::Yields,
            Self::YieldsTo(_) => DependencyKind::YieldsTo,
            Self::IncludesExactlyOneOf(_) => DependencyKind::IncludesExactlyOneOf,
        }
    }

    /// `true` once any evaluation of this dependency has succeeded.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        match self {
            Self::Flag(d) => d.satisfied_by.is_some(),
            Self::Feature(d) => d.satisfied_by.is_some(),
            Self::DependsOnOneOf(d) => d.satisfied_by.is_some(),
            Self::Yields(d) => d.yielded,
            Self::YieldsTo(d) => d.satisfied_by.is_some(),
            Self::IncludesExactlyOneOf(d) => d.satisfied_by.is_some(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(d) => write!(f, "flag '{}'", d.flag),
            Self::Feature(d) => write!(f, "feature '{}'", d.target),
            Self::DependsOnOneOf(d) => write!(f, "one of [{}]", join(&d.targets)),
            Self::Yields(_) => f.write_str("yields"),
            Self::YieldsTo(d) => write!(f, "yields to '{}'", d.target),
            Self::IncludesExactlyOneOf(d) => write!(f, "exactly one of [{}]", join(&d.flags)),
        }
    }
}

impl From<FlagDependency> for Dependency {
    fn from(value: FlagDependency) -> Self {
        Self::Flag(value)
    }
}

impl From<FeatureDependency> for Dependency {
    fn from(value: FeatureDependency) -> Self {
        Self::Feature(value)
    }
}

impl From<DependsOnOneOf> for Dependency {
    fn from(value: DependsOnOneOf) -> Self {
        Self::DependsOnOneOf(value)
    }
}

impl From<Yields> for Dependency {
    fn from(value: Yields) -> Self {
        Self::Yields(value)
    }
}

impl From<YieldsTo> for Dependency {
    fn from(value: YieldsTo) -> Self {
        Self::YieldsTo(value)
    }
}

impl From<IncludesExactlyOneOf> for Dependency {
    fn from(value: IncludesExactlyOneOf) -> Self {
        Self::IncludesExactlyOneOf(value)
    }
}
