use crate::error::{ManifestError, Result};
use fgate_domain::{DependencySpec, FeatureSelector, GateConfig};
use fgate_resolver::DependencyKind;
use fxhash::FxHashSet;
use tracing::warn;

/// Rejects manifests the resolver cannot meaningfully evaluate.
///
/// Checks, in declaration order: blank ids, duplicate ids, and empty
/// `depends_on_one_of` / `includes_exactly_one_of` groups. Selectors that
/// match no declared feature are legal (the feature simply fails to resolve)
/// and are only logged.
///
/// # Errors
/// Returns the first violation found.
pub fn validate(config: &GateConfig) -> Result<()> {
    let mut seen = FxHashSet::default();

    for (position, feature) in config.features.iter().enumerate() {
        if feature.id.is_blank() {
            return Err(ManifestError::InvalidFeature {
                message: format!("feature #{} has an empty id", position + 1).into(),
                context: None,
            });
        }
        if !seen.insert(&feature.id) {
            return Err(ManifestError::DuplicateFeature { id: feature.id.clone(), context: None });
        }

        for spec in &feature.dependencies {
            let kind = match spec {
                DependencySpec::DependsOnOneOf { targets } if targets.is_empty() => DependencyKind::DependsOnOneOf,
                DependencySpec::IncludesExactlyOneOf { flags } if flags.is_empty() => {
                    DependencyKind::IncludesExactlyOneOf
                },
                _ => continue,
            };
            return Err(ManifestError::EmptyGroup { id: feature.id.clone(), kind, context: None });
        }
    }

    for feature in &config.features {
        for selector in feature.dependencies.iter().flat_map(selectors) {
            let known = config.features.iter().any(|other| selector.matches(&other.id, &other.tags));
            if !known {
                warn!(feature = %feature.id, target = %selector, "selector matches no declared feature");
            }
        }
    }

    Ok(())
}

fn selectors(spec: &DependencySpec) -> &[FeatureSelector] {
    match spec {
        DependencySpec::Feature { target } | DependencySpec::YieldsTo { target } => std::slice::from_ref(target),
        DependencySpec::DependsOnOneOf { targets } => targets,
        DependencySpec::Flag { .. } | DependencySpec::Yields | DependencySpec::IncludesExactlyOneOf { .. } => &[],
    }
}
