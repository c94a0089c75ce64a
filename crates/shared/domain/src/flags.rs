//! Feature flags supplied by the caller for one resolution call.
//!
//! A flag is a bare marker (`server`) or a marker carrying a value (`tier=pro`).
//! Selectors use the same textual grammar; a selector without a value accepts
//! any flag with the same name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const VALUE_SEPARATOR: char = '=';

fn split_flag(raw: &str) -> Result<(Arc<str>, Option<Arc<str>>), String> {
    let (name, value) = match raw.split_once(VALUE_SEPARATOR) {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (raw.trim(), None),
    };

    if name.is_empty() {
        return Err(format!("flag '{raw}' has an empty name"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("flag name '{name}' must not contain whitespace"));
    }
    if value.is_some_and(str::is_empty) {
        return Err(format!("flag '{raw}' has an empty value"));
    }

    Ok((Arc::from(name), value.map(Arc::from)))
}

fn write_flag(f: &mut fmt::Formatter<'_>, name: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{name}{VALUE_SEPARATOR}{value}"),
        None => f.write_str(name),
    }
}

/// An opaque marker gating flag-based dependencies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureFlag {
    name: Arc<str>,
    value: Option<Arc<str>>,
}

impl FeatureFlag {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self { name: Arc::from(name), value: None }
    }

    #[must_use]
    pub fn with_value(name: &str, value: &str) -> Self {
        Self { name: Arc::from(name), value: Some(Arc::from(value)) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl FromStr for FeatureFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = split_flag(s)?;
        Ok(Self { name, value })
    }
}

impl TryFrom<String> for FeatureFlag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeatureFlag> for String {
    fn from(flag: FeatureFlag) -> Self {
        flag.to_string()
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flag(f, &self.name, self.value())
    }
}

/// Criterion matching flags by name and, optionally, by exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlagSelector {
    name: Arc<str>,
    value: Option<Arc<str>>,
}

impl FlagSelector {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self { name: Arc::from(name), value: None }
    }

    #[must_use]
    pub fn with_value(name: &str, value: &str) -> Self {
        Self { name: Arc::from(name), value: Some(Arc::from(value)) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// A flag is compatible when the names match and, if this selector pins a
    /// value, the flag carries that exact value.
    #[must_use]
    pub fn matches(&self, flag: &FeatureFlag) -> bool {
        *self.name == *flag.name
            && self.value.as_ref().is_none_or(|want| flag.value.as_ref() == Some(want))
    }
}

impl FromStr for FlagSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = split_flag(s)?;
        Ok(Self { name, value })
    }
}

impl TryFrom<String> for FlagSelector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlagSelector> for String {
    fn from(selector: FlagSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for FlagSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flag(f, &self.name, self.value())
    }
}

/// The fixed, de-duplicated flag collection for one resolution call.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureFlag>", into = "Vec<FeatureFlag>")]
pub struct FlagSet {
    flags: Vec<FeatureFlag>,
}

impl FlagSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { flags: Vec::new() }
    }

    /// Adds a flag; returns `false` if an equal flag was already present.
    pub fn insert(&mut self, flag: FeatureFlag) -> bool {
        if self.flags.contains(&flag) {
            return false;
        }
        self.flags.push(flag);
        true
    }

    #[must_use]
    pub fn contains(&self, flag: &FeatureFlag) -> bool {
        self.flags.contains(flag)
    }

    /// Flags accepted by `selector`, in insertion order.
    pub fn matching<'a>(
        &'a self,
        selector: &'a FlagSelector,
    ) -> impl Iterator<Item = &'a FeatureFlag> + 'a {
        self.flags.iter().filter(move |flag| selector.matches(flag))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureFlag> {
        self.flags.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<FeatureFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = FeatureFlag>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl From<Vec<FeatureFlag>> for FlagSet {
    fn from(flags: Vec<FeatureFlag>) -> Self {
        flags.into_iter().collect()
    }
}

impl From<FlagSet> for Vec<FeatureFlag> {
    fn from(set: FlagSet) -> Self {
        set.flags
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a FeatureFlag;
    type IntoIter = std::slice::Iter<'a, FeatureFlag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_valued_flags() {
        let bare: FeatureFlag = "server".parse().unwrap();
        assert_eq!(bare.name(), "server");
        assert_eq!(bare.value(), None);

        let valued: FeatureFlag = " tier = pro ".parse().unwrap();
        assert_eq!(valued.name(), "tier");
        assert_eq!(valued.value(), Some("pro"));
        assert_eq!(valued.to_string(), "tier=pro");
    }

    #[test]
    fn rejects_malformed_flags() {
        assert!("".parse::<FeatureFlag>().is_err());
        assert!("=pro".parse::<FeatureFlag>().is_err());
        assert!("tier=".parse::<FeatureFlag>().is_err());
        assert!("two words".parse::<FlagSelector>().is_err());
    }

    #[test]
    fn selector_without_value_accepts_any_value() {
        let any_tier = FlagSelector::named("tier");
        assert!(any_tier.matches(&FeatureFlag::with_value("tier", "pro")));
        assert!(any_tier.matches(&FeatureFlag::named("tier")));
        assert!(!any_tier.matches(&FeatureFlag::named("server")));
    }

    #[test]
    fn selector_with_value_requires_exact_value() {
        let pro = FlagSelector::with_value("tier", "pro");
        assert!(pro.matches(&FeatureFlag::with_value("tier", "pro")));
        assert!(!pro.matches(&FeatureFlag::with_value("tier", "free")));
        assert!(!pro.matches(&FeatureFlag::named("tier")));
    }

    #[test]
    fn flag_set_deduplicates_and_keeps_order() {
        let set: FlagSet = ["b", "a", "b", "tier=pro"]
            .into_iter()
            .map(|raw| raw.parse::<FeatureFlag>().unwrap())
            .collect();

        let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["b", "a", "tier=pro"]);
        assert_eq!(set.matching(&FlagSelector::named("tier")).count(), 1);
    }
}
