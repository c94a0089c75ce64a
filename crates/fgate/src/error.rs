use fgate_domain::FeatureId;
use fgate_resolver::DependencyKind;
use std::borrow::Cow;

/// Errors raised while loading, validating or querying a manifest.
#[fgate_derive::fgate_error]
pub enum ManifestError {
    #[error("Invalid feature{}: {message}", format_context(.context))]
    InvalidFeature { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Duplicate feature{}: '{id}' is declared more than once", format_context(.context))]
    DuplicateFeature { id: FeatureId, context: Option<Cow<'static, str>> },

    #[error("Empty group{}: feature '{id}' declares an empty {kind} group", format_context(.context))]
    EmptyGroup { id: FeatureId, kind: DependencyKind, context: Option<Cow<'static, str>> },

    #[error("Unknown feature{}: '{id}'", format_context(.context))]
    UnknownFeature { id: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Loading the manifest file failed.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: fgate_kernel::config::ConfigError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal manifest error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
