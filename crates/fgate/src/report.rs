use crate::error::{ManifestError, Result};
use crate::plugin::Plugin;
use fgate_domain::FeatureId;
use fgate_resolver::{Dependency, FailureSet, Feature, Resolution, ResolutionEntry};
use serde::Serialize;
use std::fmt;

/// Listing order of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Manifest declaration order.
    #[default]
    Input,
    /// Declaration order reversed, as returned by `resolve_ordered`.
    Reversed,
    /// Resolved features by round, then failed features in declaration order.
    Resolution,
}

/// One feature's line in a report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Outcome<'a> {
    pub id: &'a FeatureId,
    pub resolved_in: Option<u32>,
    pub failures: &'a FailureSet,
}

impl<'a> Outcome<'a> {
    fn new((id, entry): (&'a FeatureId, &'a ResolutionEntry)) -> Self {
        Self { id, resolved_in: entry.resolved_in(), failures: entry.failures() }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Serializable snapshot of a [`Report`].
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub rounds: u32,
    pub success: bool,
    pub order: Order,
    pub active: Vec<&'a FeatureId>,
    pub features: Vec<Outcome<'a>>,
}

/// Result of resolving a manifest.
///
/// Keeps the plugins so the recorded output of every dependency stays inspectable.
#[derive(Debug, Clone)]
pub struct Report {
    resolution: Resolution,
    plugins: Vec<Plugin>,
    active: Vec<Plugin>,
}

impl Report {
    pub(crate) const fn new(resolution: Resolution, plugins: Vec<Plugin>, active: Vec<Plugin>) -> Self {
        Self { resolution, plugins, active }
    }

    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Plugins that took part in resolution.
    #[must_use]
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Plugins that were active before resolution.
    #[must_use]
    pub fn active(&self) -> &[Plugin] {
        &self.active
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.resolution.failed().next().is_none()
    }

    #[must_use]
    pub fn outcomes(&self, order: Order) -> Vec<Outcome<'_>> {
        match order {
            Order::Input => self.resolution.iter().map(Outcome::new).collect(),
            Order::Reversed => self.resolution.iter().rev().map(Outcome::new).collect(),
            Order::Resolution => {
                let mut list: Vec<Outcome<'_>> = self
                    .resolution
                    .resolution_order()
                    .into_iter()
                    .filter_map(|id| self.resolution.entry(id.as_str()).map(|entry| Outcome::new((id, entry))))
                    .collect();
                list.extend(self.resolution.iter().filter(|(_, e)| !e.is_resolved()).map(Outcome::new));
                list
            },
        }
    }

    #[must_use]
    pub fn view(&self, order: Order) -> ReportView<'_> {
        ReportView {
            rounds: self.resolution.rounds(),
            success: self.is_success(),
            order,
            active: self.active.iter().map(Feature::id).collect(),
            features: self.outcomes(order),
        }
    }

    /// Describes one feature: its dependencies, what satisfied them, and its failures.
    ///
    /// # Errors
    /// Returns [`ManifestError::UnknownFeature`] when no plugin has this id.
    pub fn explain(&self, id: &str) -> Result<Explanation<'_>> {
        let plugin = self
            .plugins
            .iter()
            .chain(&self.active)
            .find(|p| p.id().as_str() == id)
            .ok_or_else(|| ManifestError::UnknownFeature { id: id.to_owned().into(), context: None })?;

        Ok(Explanation { plugin, entry: self.resolution.entry(id) })
    }

    #[must_use]
    pub fn into_resolution(self) -> Resolution {
        self.resolution
    }
}

/// Human-readable account of a single feature.
#[derive(Debug, Clone, Copy)]
pub struct Explanation<'a> {
    plugin: &'a Plugin,
    entry: Option<&'a ResolutionEntry>,
}

impl<'a> Explanation<'a> {
    #[must_use]
    pub const fn plugin(&self) -> &'a Plugin {
        self.plugin
    }

    #[must_use]
    pub const fn entry(&self) -> Option<&'a ResolutionEntry> {
        self.entry
    }
}

impl fmt::Display for Explanation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.plugin.is_active() {
            "active".to_owned()
        } else {
            match self.entry.and_then(ResolutionEntry::resolved_in) {
                Some(round) => format!("resolved in round {round}"),
                None => "failed".to_owned(),
            }
        };
        writeln!(f, "{}: {status}", self.plugin.id())?;

        if self.plugin.dependencies().is_empty() {
            writeln!(f, "  (no dependencies)")?;
        }
        for dependency in self.plugin.dependencies() {
            match satisfaction(dependency) {
                Some(by) => writeln!(f, "  {dependency}: satisfied by {by}")?,
                None => writeln!(f, "  {dependency}: not satisfied")?,
            }
        }

        if let Some(entry) = self.entry.filter(|e| !e.is_resolved()) {
            writeln!(f, "failures:")?;
            for failure in entry.failures() {
                writeln!(f, "  - [{}] {}", failure.kind(), failure.reason())?;
            }
        }
        Ok(())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn satisfaction(dependency: &Dependency) -> Option<String> {
    match dependency {
        Dependency::Flag(d) => d.satisfied_by().map(join),
        Dependency::Feature(d) => d.satisfied_by().map(join),
        Dependency::DependsOnOneOf(d) => d.satisfied_by().map(|ids| {
            if ids.is_empty() { "a feature resolved in this cycle".to_owned() } else { join(ids) }
        }),
        Dependency::Yields(d) => d.yielded().then(|| "the yielding round".to_owned()),
        Dependency::YieldsTo(d) => d.satisfied_by().map(join),
        Dependency::IncludesExactlyOneOf(d) => d.satisfied_by().map(ToString::to_string),
    }
}
