use fgate_domain::{
    DependencySpec, FeatureFlag, FeatureId, FeatureSelector, FlagSelector, GateConfig,
    LoggingConfig,
};
use serde_json::json;

const MANIFEST: &str = r#"
flags = ["server", "tier=pro", "server"]

[logging]
level = "debug"

[[features]]
id = "audit"
tags = ["trail"]
dependencies = [
  { kind = "flag", flag = "server" },
  { kind = "feature", target = "tag:storage" },
  { kind = "depends_on_one_of", targets = ["sqlite", "postgres"] },
  { kind = "yields" },
  { kind = "yields_to", target = "identity" },
  { kind = "includes_exactly_one_of", flags = ["tier=free", "tier=pro"] },
]

[[features]]
id = "identity"
active = true
"#;

#[test]
fn logging_defaults_are_sane() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "warn");
    assert!(logging.ansi);
    assert!(!logging.json);
    assert!(logging.dir.is_none());
}

#[test]
fn toml_manifest_deserializes() {
    let cfg: GateConfig = toml::from_str(MANIFEST).expect("manifest deserialize");

    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.flags.len(), 2, "duplicate flags collapse");
    assert!(cfg.flags.contains(&FeatureFlag::with_value("tier", "pro")));

    let audit = &cfg.features[0];
    assert_eq!(audit.id, FeatureId::from("audit"));
    assert!(!audit.active);
    assert_eq!(
        audit.dependencies,
        vec![
            DependencySpec::Flag { flag: FlagSelector::named("server") },
            DependencySpec::Feature { target: FeatureSelector::tag("storage") },
            DependencySpec::DependsOnOneOf {
                targets: vec![FeatureSelector::id("sqlite"), FeatureSelector::id("postgres")],
            },
            DependencySpec::Yields,
            DependencySpec::YieldsTo { target: FeatureSelector::id("identity") },
            DependencySpec::IncludesExactlyOneOf {
                flags: vec![
                    FlagSelector::with_value("tier", "free"),
                    FlagSelector::with_value("tier", "pro"),
                ],
            },
        ]
    );

    let identity = &cfg.features[1];
    assert!(identity.active);
    assert!(identity.dependencies.is_empty());
}

#[test]
fn json_manifest_deserializes() {
    let raw = json!({
        "flags": ["beta"],
        "features": [
            { "id": "search", "dependencies": [{ "kind": "flag", "flag": "beta" }] }
        ]
    });

    let cfg: GateConfig = serde_json::from_value(raw).expect("manifest deserialize");
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.features.len(), 1);
    assert_eq!(cfg.features[0].tags.len(), 0);
}

#[test]
fn unknown_dependency_kind_is_rejected() {
    let raw = json!({
        "features": [{ "id": "search", "dependencies": [{ "kind": "conflicts_with" }] }]
    });

    assert!(serde_json::from_value::<GateConfig>(raw).is_err());
}

#[test]
fn malformed_selectors_are_rejected() {
    let raw = json!({
        "features": [{ "id": "search", "dependencies": [{ "kind": "feature", "target": "tag:" }] }]
    });

    let err = serde_json::from_value::<GateConfig>(raw).unwrap_err();
    assert!(err.to_string().contains("is empty"), "unexpected error: {err}");
}
