//! The fixed-point loop.

use crate::dependency::Dependency;
use crate::failure::{FailureRecord, FailureSet};
use crate::feature::{Candidate, CandidatePool, Feature};
use crate::ordered::OrderedMap;
use crate::resolution::{Resolution, ResolutionEntry};
use fgate_domain::{FeatureId, FlagSet};
use fxhash::FxHashSet;
use std::iter;
use tracing::{debug, info, info_span, trace, warn};

/// Read-only inputs shared by every evaluation in one round.
struct Round<'a> {
    resolved: CandidatePool<'a>,
    active: CandidatePool<'a>,
    flags: &'a FlagSet,
    yielding: bool,
}

/// Resolves `unresolved` against already-`active` features and the given flags.
///
/// Runs rounds until none of the remaining features can make progress. When
/// a round resolves nothing, one more round runs with yielding enabled; if
/// that also resolves nothing, every remaining feature receives a deadlock
/// record and the loop stops. Progress always switches yielding back off.
///
/// Each round matches targets against a snapshot of every feature whose
/// record is clean at the start of the round. That covers features resolved
/// earlier and features without dependencies, which never fail a round.
///
/// Dependency objects in `unresolved` record what satisfied them. `active`
/// features are only consulted as candidates. When `unresolved` contains the
/// same id twice, only the first occurrence takes part.
pub fn resolve<F: Feature>(unresolved: &mut [F], active: &[F], flags: &FlagSet) -> Resolution {
    let span = info_span!("resolve", unresolved = unresolved.len(), active = active.len(), flags = flags.len());
    let _entered = span.enter();

    let order = distinct_indices(unresolved);
    if order.is_empty() {
        debug!("nothing to resolve");
        return Resolution::default();
    }

    let active_pool: Vec<Candidate> = active.iter().map(Candidate::of).collect();
    let mut working = order.clone();
    let mut entries: OrderedMap<FeatureId, ResolutionEntry> = OrderedMap::with_capacity(working.len());

    let max_rounds = 2 * working.len() + 1;
    let mut yielding = false;
    let mut round: u32 = 0;

    loop {
        round += 1;
        debug_assert!(round as usize <= max_rounds, "resolution exceeded {max_rounds} rounds");

        let remaining = working.len();
        let resolved_pool: Vec<Candidate> = order
            .iter()
            .map(|&index| &unresolved[index])
            .filter(|feature| entries.get(feature.id()).is_some_and(|entry| entry.failures().is_empty()))
            .map(Candidate::of)
            .collect();
        let mut progressed = Vec::new();
        {
            let context = Round {
                resolved: CandidatePool::resolved(&resolved_pool),
                active: CandidatePool::active(&active_pool),
                flags,
                yielding,
            };

            for &index in &working {
                let feature = &mut unresolved[index];
                let id = feature.id().clone();
                let (resolves, failures) = evaluate_feature(&id, feature.dependencies_mut(), &context);
                trace!(feature = %id, round, resolves, failures = failures.len(), "evaluated");

                entries.get_or_insert_with(id, ResolutionEntry::default).failures_mut().extend(failures);
                if resolves {
                    progressed.push(index);
                }
            }
        }

        for &index in &progressed {
            let feature = &unresolved[index];
            if let Some(entry) = entries.get_mut(feature.id()) {
                entry.mark_resolved(round);
            }
        }
        working.retain(|index| !progressed.contains(index));
        debug!(round, yielding, resolved = progressed.len(), remaining = working.len(), "round finished");

        if working.len() < remaining {
            yielding = false;
            if working.is_empty() {
                break;
            }
            continue;
        }

        if yielding {
            for &index in &working {
                let id = unresolved[index].id();
                warn!(feature = %id, round, "deadlocked");
                if let Some(entry) = entries.get_mut(id) {
                    entry.failures_mut().insert(FailureRecord::deadlock(id.clone()));
                }
            }
            break;
        }

        debug!(round, remaining, "no progress, next round yields");
        yielding = true;
    }

    let resolution = Resolution::new(entries, round);
    info!(
        rounds = round,
        resolved = resolution.resolved().count(),
        failed = resolution.failed().count(),
        "resolution finished"
    );
    resolution
}

/// Same as [`resolve`], flattened to a list in the reverse of map order.
pub fn resolve_ordered<F: Feature>(
    unresolved: &mut [F],
    active: &[F],
    flags: &FlagSet,
) -> Vec<(FeatureId, FailureSet)> {
    resolve(unresolved, active, flags).into_ordered_list()
}

fn distinct_indices<F: Feature>(features: &[F]) -> Vec<usize> {
    let mut seen: FxHashSet<&FeatureId> = FxHashSet::default();
    let mut indices = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        if seen.insert(feature.id()) {
            indices.push(index);
        } else {
            warn!(feature = %feature.id(), "duplicate feature ignored");
        }
    }
    indices
}

/// Evaluates every dependency; no short-circuit, so all failures are collected.
fn evaluate_feature(owner: &FeatureId, dependencies: &mut [Dependency], round: &Round<'_>) -> (bool, FailureSet) {
    let mut failures = FailureSet::new();
    let mut satisfied = true;
    for dependency in dependencies.iter_mut() {
        satisfied &= evaluate_dependency(owner, dependency, round, &mut failures);
    }
    // A feature without dependencies never resolves.
    (satisfied && !dependencies.is_empty(), failures)
}

fn evaluate_dependency(
    owner: &FeatureId,
    dependency: &mut Dependency,
    round: &Round<'_>,
    failures: &mut FailureSet,
) -> bool {
    match dependency {
        Dependency::Flag(dep) => {
            settle(dep.evaluate(owner, round.flags).map_err(iter::once), failures, |flags| dep.accept_output(flags))
        },
        Dependency::IncludesExactlyOneOf(dep) => {
            settle(dep.evaluate(owner, round.flags).map_err(iter::once), failures, |flag| dep.accept_output(flag))
        },
        Dependency::Yields(dep) => {
            settle(dep.evaluate(owner, round.yielding).map_err(iter::once), failures, |()| dep.accept_output(()))
        },
        Dependency::Feature(dep) => settle(
            union(dep.evaluate(owner, &round.resolved), dep.evaluate(owner, &round.active)),
            failures,
            |ids| dep.accept_output(ids),
        ),
        Dependency::YieldsTo(dep) => settle(
            union(
                dep.evaluate(owner, round.yielding, &round.resolved),
                dep.evaluate(owner, round.yielding, &round.active),
            ),
            failures,
            |ids| dep.accept_output(ids),
        ),
        Dependency::DependsOnOneOf(dep) => {
            let resolved = dep.evaluate(owner, &round.resolved);
            let active = dep.evaluate(owner, &round.active);
            // Only the active-side match is recorded, even when resolved features carried the success.
            let outcome = match (resolved, active) {
                (_, Ok(ids)) => Ok(ids),
                (Ok(_), Err(_)) => Ok(Vec::new()),
                (Err(left), Err(right)) => Err([left, right]),
            };
            settle(outcome, failures, |ids| dep.accept_output(ids))
        },
    }
}

/// Merges two-pool outcomes: succeeds if either side did, resolved matches first.
fn union(
    resolved: Result<Vec<FeatureId>, FailureRecord>,
    active: Result<Vec<FeatureId>, FailureRecord>,
) -> Result<Vec<FeatureId>, [FailureRecord; 2]> {
    match (resolved, active) {
        (Ok(mut ids), Ok(more)) => {
            for id in more {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            Ok(ids)
        },
        (Ok(ids), Err(_)) | (Err(_), Ok(ids)) => Ok(ids),
        (Err(left), Err(right)) => Err([left, right]),
    }
}

fn settle<T, E: IntoIterator<Item = FailureRecord>>(
    outcome: Result<T, E>,
    failures: &mut FailureSet,
    accept: impl FnOnce(T),
) -> bool {
    match outcome {
        Ok(payload) => {
            accept(payload);
            true
        },
        Err(records) => {
            failures.extend(records);
            false
        },
    }
}
