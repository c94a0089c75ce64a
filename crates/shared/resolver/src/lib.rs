//! # FeatureGate Resolver
//!
//! Decides which of a set of candidate features may activate, given the
//! features that are already active and a set of feature flags.
//!
//! ## Model
//!
//! Each [`Feature`] declares a list of [`Dependency`] values. Resolution runs
//! in rounds: every still-unresolved feature evaluates all of its
//! dependencies, and the features whose dependencies all succeed are removed
//! from the working set and become candidates for the next round. When a
//! round makes no progress, a *yielding* round follows in which [`Yields`]
//! and [`YieldsTo`] dependencies may succeed. A second round without
//! progress ends the call and every leftover feature is reported as
//! deadlocked.
//!
//! A feature with no dependencies never resolves.
//!
//! ## Example
//!
//! ```rust
//! use fgate_domain::{FeatureFlag, FeatureId, FeatureSelector, FlagSelector, FlagSet};
//! use fgate_resolver::{Dependency, Feature, resolve};
//!
//! #[derive(Debug)]
//! struct Module {
//!     id: FeatureId,
//!     dependencies: Vec<Dependency>,
//! }
//!
//! impl Feature for Module {
//!     fn id(&self) -> &FeatureId {
//!         &self.id
//!     }
//!     fn dependencies(&self) -> &[Dependency] {
//!         &self.dependencies
//!     }
//!     fn dependencies_mut(&mut self) -> &mut [Dependency] {
//!         &mut self.dependencies
//!     }
//! }
//!
//! let mut modules = vec![
//!     Module { id: "db".into(), dependencies: vec![Dependency::flag(FlagSelector::named("server"))] },
//!     Module { id: "api".into(), dependencies: vec![Dependency::feature(FeatureSelector::id("db"))] },
//! ];
//! let flags: FlagSet = [FeatureFlag::named("server")].into_iter().collect();
//!
//! let resolution = resolve(&mut modules, &[], &flags);
//! assert!(resolution.is_resolved("db"));
//! assert!(resolution.is_resolved("api"));
//! assert_eq!(resolution.rounds(), 2);
//! ```

mod dependency;
mod engine;
mod failure;
mod feature;
mod ordered;
mod resolution;

pub use dependency::{
    Dependency, DependencyKind, DependsOnOneOf, FeatureDependency, FlagDependency, IncludesExactlyOneOf, Yields,
    YieldsTo,
};
pub use engine::{resolve, resolve_ordered};
pub use failure::{DEADLOCK_REASON, FailureKind, FailureRecord, FailureSet};
pub use feature::{Candidate, CandidatePool, Feature, Scope};
pub use ordered::OrderedMap;
pub use resolution::{Resolution, ResolutionEntry};
