use fgate_domain::{DependencySpec, FeatureId, FeatureManifest, GateConfig, Tag};
use fgate_resolver::{Dependency, Feature};

/// A feature declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    id: FeatureId,
    tags: Vec<Tag>,
    active: bool,
    dependencies: Vec<Dependency>,
}

impl Plugin {
    #[must_use]
    pub fn new(id: impl Into<FeatureId>) -> Self {
        Self { id: id.into(), tags: Vec::new(), active: false, dependencies: Vec::new() }
    }

    #[must_use]
    pub fn from_manifest(manifest: &FeatureManifest) -> Self {
        Self {
            id: manifest.id.clone(),
            tags: manifest.tags.clone(),
            active: manifest.active,
            dependencies: manifest.dependencies.iter().map(dependency).collect(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Marks the plugin as running before the activation cycle.
    #[must_use]
    pub const fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Feature for Plugin {
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

fn dependency(spec: &DependencySpec) -> Dependency {
    match spec {
        DependencySpec::Flag { flag } => Dependency::flag(flag.clone()),
        DependencySpec::Feature { target } => Dependency::feature(target.clone()),
        DependencySpec::DependsOnOneOf { targets } => Dependency::one_of(targets.iter().cloned()),
        DependencySpec::Yields => Dependency::yields(),
        DependencySpec::YieldsTo { target } => Dependency::yields_to(target.clone()),
        DependencySpec::IncludesExactlyOneOf { flags } => Dependency::exactly_one_of(flags.iter().cloned()),
    }
}

/// Builds [`Plugin`]s from a declarative manifest.
pub trait Manifest {
    /// Every declared feature, in declaration order.
    fn plugins(&self) -> Vec<Plugin>;
}

impl Manifest for GateConfig {
    fn plugins(&self) -> Vec<Plugin> {
        self.features.iter().map(Plugin::from_manifest).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgate_domain::{FeatureSelector, FlagSelector};
    use fgate_resolver::DependencyKind;

    #[test]
    fn converts_every_dependency_kind() {
        let manifest = FeatureManifest {
            id: FeatureId::from("audit"),
            tags: vec![Tag::from("observability")],
            active: false,
            dependencies: vec![
                DependencySpec::Flag { flag: FlagSelector::named("server") },
                DependencySpec::Feature { target: FeatureSelector::tag("storage") },
                DependencySpec::DependsOnOneOf { targets: vec![FeatureSelector::id("sqlite")] },
                DependencySpec::Yields,
                DependencySpec::YieldsTo { target: FeatureSelector::id("identity") },
                DependencySpec::IncludesExactlyOneOf { flags: vec![FlagSelector::named("free")] },
            ],
        };

        let plugin = Plugin::from_manifest(&manifest);
        let kinds: Vec<DependencyKind> = plugin.dependencies().iter().map(Dependency::kind).collect();

        assert_eq!(
            kinds,
            [
                DependencyKind::Flag,
                DependencyKind::Feature,
                DependencyKind::DependsOnOneOf,
                DependencyKind::Yields,
                DependencyKind::YieldsTo,
                DependencyKind::IncludesExactlyOneOf,
            ]
        );
        assert_eq!(plugin.tags(), [Tag::from("observability")]);
        assert!(!plugin.is_active());
    }
}
