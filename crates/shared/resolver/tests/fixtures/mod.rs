#![allow(dead_code)]

use fgate_domain::{FeatureFlag, FeatureId, FeatureSelector, FlagSelector, FlagSet, Tag};
use fgate_resolver::{Dependency, Feature};

/// Minimal feature used across the resolver tests.
#[derive(Debug, Clone)]
pub struct Module {
    id: FeatureId,
    tags: Vec<Tag>,
    dependencies: Vec<Dependency>,
}

impl Module {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self { id: FeatureId::from(id), tags: Vec::new(), dependencies: Vec::new() }
    }

    #[must_use]
    pub fn tagged(mut self, tag: &str) -> Self {
        self.tags.push(Tag::from(tag));
        self
    }

    #[must_use]
    pub fn with(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    #[must_use]
    pub fn needs_flag(self, flag: &str) -> Self {
        self.with(Dependency::flag(flag.parse::<FlagSelector>().unwrap()))
    }

    #[must_use]
    pub fn needs(self, target: &str) -> Self {
        self.with(Dependency::feature(target.parse::<FeatureSelector>().unwrap()))
    }

    #[must_use]
    pub fn needs_one_of(self, targets: &[&str]) -> Self {
        self.with(Dependency::one_of(targets.iter().map(|t| t.parse::<FeatureSelector>().unwrap())))
    }

    #[must_use]
    pub fn yields(self) -> Self {
        self.with(Dependency::yields())
    }

    #[must_use]
    pub fn yields_to(self, target: &str) -> Self {
        self.with(Dependency::yields_to(target.parse::<FeatureSelector>().unwrap()))
    }

    #[must_use]
    pub fn exactly_one_of(self, flags: &[&str]) -> Self {
        self.with(Dependency::exactly_one_of(flags.iter().map(|f| f.parse::<FlagSelector>().unwrap())))
    }
}

impl Feature for Module {
    fn id(&self) -> &FeatureId {
        &self.id
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    fn dependencies_mut(&mut self) -> &mut [Dependency] {
        &mut self.dependencies
    }
}

#[must_use]
pub fn flags(raw: &[&str]) -> FlagSet {
    raw.iter().map(|f| f.parse::<FeatureFlag>().unwrap()).collect()
}

#[must_use]
pub fn no_flags() -> FlagSet {
    FlagSet::new()
}
