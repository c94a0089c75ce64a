//! # Domain Models
//!
//! Pure types shared by every `FeatureGate` crate: identifiers, feature flags,
//! selectors, and the declarative manifest.
//! Keep it lean: only `serde`, no I/O and no resolution logic.

pub mod flags;
pub mod ids;
pub mod manifest;
pub mod selector;

pub use flags::{FeatureFlag, FlagSelector, FlagSet};
pub use ids::{FeatureId, Tag};
pub use manifest::{DependencySpec, FeatureManifest, GateConfig, LoggingConfig};
pub use selector::FeatureSelector;
