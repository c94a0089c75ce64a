use crate::dependency::Dependency;
use fgate_domain::{FeatureId, FeatureSelector, Tag};
use std::fmt;

/// Anything the resolver can activate.
///
/// Implementors own their dependency list; the resolver mutates it in place
/// to record what satisfied each dependency.
pub trait Feature {
    fn id(&self) -> &FeatureId;

    /// Capability labels matched by `tag:` selectors.
    fn tags(&self) -> &[Tag] {
        &[]
    }

    fn dependencies(&self) -> &[Dependency];

    fn dependencies_mut(&mut self) -> &mut [Dependency];
}

/// Identity and tags of a feature offered as a match target.
///
/// Snapshotted so candidate lookups never alias the features being mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: FeatureId,
    tags: Vec<Tag>,
}

impl Candidate {
    #[must_use]
    pub fn new(id: impl Into<FeatureId>, tags: impl IntoIterator<Item = Tag>) -> Self {
        Self { id: id.into(), tags: tags.into_iter().collect() }
    }

    pub fn of<F: Feature + ?Sized>(feature: &F) -> Self {
        Self { id: feature.id().clone(), tags: feature.tags().to_vec() }
    }

    #[must_use]
    pub const fn id(&self) -> &FeatureId {
        &self.id
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn matches(&self, selector: &FeatureSelector) -> bool {
        selector.matches(&self.id, &self.tags)
    }
}

/// Which collection a [`CandidatePool`] was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Features of the current call whose record was clean when the round started.
    Resolved,
    /// Features that were active before the call.
    Active,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolved => "resolved in this cycle",
            Self::Active => "already active",
        })
    }
}

/// A borrowed candidate collection tagged with its [`Scope`].
#[derive(Debug, Clone, Copy)]
pub struct CandidatePool<'a> {
    scope: Scope,
    members: &'a [Candidate],
}

impl<'a> CandidatePool<'a> {
    #[must_use]
    pub const fn new(scope: Scope, members: &'a [Candidate]) -> Self {
        Self { scope, members }
    }

    #[must_use]
    pub const fn resolved(members: &'a [Candidate]) -> Self {
        Self::new(Scope::Resolved, members)
    }

    #[must_use]
    pub const fn active(members: &'a [Candidate]) -> Self {
        Self::new(Scope::Active, members)
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Ids of members accepted by `selector`, in pool order.
    pub fn matching(&self, selector: &'a FeatureSelector) -> impl Iterator<Item = &'a FeatureId> + 'a {
        self.members.iter().filter(move |c| c.matches(selector)).map(Candidate::id)
    }

    /// Ids of members accepted by any of `selectors`, each member at most once.
    #[must_use]
    pub fn matching_any(&self, selectors: &[FeatureSelector]) -> Vec<FeatureId> {
        self.members
            .iter()
            .filter(|c| selectors.iter().any(|s| c.matches(s)))
            .map(|c| c.id().clone())
            .collect()
    }
}
