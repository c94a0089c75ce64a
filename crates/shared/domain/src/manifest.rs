use crate::flags::{FlagSelector, FlagSet};
use crate::ids::{FeatureId, Tag};
use crate::selector::FeatureSelector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level manifest: the flag set, the declared features and logging knobs.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub logging: LoggingConfig,
    pub flags: FlagSet,
    pub features: Vec<FeatureManifest>,
}

/// Logging knobs consumed by the binary when it installs the subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub ansi: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

/// One declared feature.
///
/// `active = true` marks a feature that is already running before this
/// activation cycle; it is offered as a candidate but not resolved again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureManifest {
    pub id: FeatureId,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

/// Declarative form of a dependency, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencySpec {
    /// A flag compatible with `flag` must be present.
    Flag { flag: FlagSelector },
    /// A feature matching `target` must be resolved or active.
    Feature { target: FeatureSelector },
    /// Any one of `targets` must be resolved or active.
    DependsOnOneOf { targets: Vec<FeatureSelector> },
    /// Only succeeds once nothing else can make progress.
    Yields,
    /// Like `yields`, and a feature matching `target` must be resolved or active.
    YieldsTo { target: FeatureSelector },
    /// Exactly one flag from `flags` must be present.
    IncludesExactlyOneOf { flags: Vec<FlagSelector> },
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), filter: None, ansi: true, dir: None, json: false }
    }
}
