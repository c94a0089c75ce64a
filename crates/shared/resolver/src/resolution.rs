use crate::failure::FailureSet;
use crate::ordered::OrderedMap;
use fgate_domain::FeatureId;
use serde::Serialize;

/// Outcome for one feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionEntry {
    failures: FailureSet,
    resolved_in: Option<u32>,
}

impl ResolutionEntry {
    #[must_use]
    pub const fn failures(&self) -> &FailureSet {
        &self.failures
    }

    /// Round (1-based) in which the feature resolved.
    #[must_use]
    pub const fn resolved_in(&self) -> Option<u32> {
        self.resolved_in
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) const fn failures_mut(&mut self) -> &mut FailureSet {
        &mut self.failures
    }

    pub(crate) fn mark_resolved(&mut self, round: u32) {
        self.failures.clear();
        self.resolved_in = Some(round);
    }
}

/// Every input feature mapped to its final failure set, in first-seen order.
///
/// An empty failure set means the feature resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    entries: OrderedMap<FeatureId, ResolutionEntry>,
    rounds: u32,
}

impl Resolution {
    pub(crate) const fn new(entries: OrderedMap<FeatureId, ResolutionEntry>, rounds: u32) -> Self {
        Self { entries, rounds }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FailureSet> {
        self.entries.get(id).map(ResolutionEntry::failures)
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&ResolutionEntry> {
        self.entries.get(id)
    }

    /// `false` for failed features and for ids that were never submitted.
    #[must_use]
    pub fn is_resolved(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(ResolutionEntry::is_resolved)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&FeatureId, &ResolutionEntry)> {
        self.entries.iter()
    }

    pub fn resolved(&self) -> impl Iterator<Item = &FeatureId> {
        self.iter().filter(|(_, e)| e.is_resolved()).map(|(id, _)| id)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&FeatureId, &FailureSet)> {
        self.iter().filter(|(_, e)| !e.is_resolved()).map(|(id, e)| (id, e.failures()))
    }

    /// Resolved features sorted by the round they resolved in, ties in input order.
    ///
    /// Every feature appears after the features resolved in earlier rounds.
    #[must_use]
    pub fn resolution_order(&self) -> Vec<&FeatureId> {
        let mut order: Vec<(u32, &FeatureId)> =
            self.iter().filter_map(|(id, e)| e.resolved_in().map(|round| (round, id))).collect();
        order.sort_by_key(|(round, _)| *round);
        order.into_iter().map(|(_, id)| id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rounds the loop ran, including the yielding ones.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Strips round bookkeeping, keeping the feature-to-failures mapping.
    #[must_use]
    pub fn into_map(self) -> OrderedMap<FeatureId, FailureSet> {
        self.entries.map_values(|e| e.failures)
    }

    /// Entries as a list in the reverse of map order.
    #[must_use]
    pub fn into_ordered_list(self) -> Vec<(FeatureId, FailureSet)> {
        let mut list: Vec<(FeatureId, FailureSet)> = self.into_map().into_iter().collect();
        list.reverse();
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureRecord;

    fn sample() -> Resolution {
        let mut entries = OrderedMap::new();
        for (id, round) in [("late", Some(2)), ("failed", None), ("early", Some(1)), ("also-early", Some(1))] {
            let entry = entries.get_or_insert_with(FeatureId::from(id), ResolutionEntry::default);
            match round {
                Some(round) => entry.mark_resolved(round),
                None => {
                    entry.failures_mut().insert(FailureRecord::deadlock(FeatureId::from(id)));
                },
            }
        }
        Resolution::new(entries, 4)
    }

    #[test]
    fn order_follows_rounds_then_input() {
        let resolution = sample();
        let order: Vec<&str> = resolution.resolution_order().into_iter().map(FeatureId::as_str).collect();
        assert_eq!(order, ["early", "also-early", "late"]);
    }

    #[test]
    fn ordered_list_is_reversed() {
        let ids: Vec<String> =
            sample().into_ordered_list().into_iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, ["also-early", "early", "failed", "late"]);
    }

    #[test]
    fn lookups_distinguish_failed_and_unknown() {
        let resolution = sample();
        assert!(resolution.is_resolved("late"));
        assert!(!resolution.is_resolved("failed"));
        assert!(!resolution.is_resolved("missing"));
        assert!(resolution.get("failed").is_some_and(FailureSet::has_deadlock));
        assert_eq!(resolution.failed().count(), 1);
        assert_eq!(resolution.rounds(), 4);
    }
}
