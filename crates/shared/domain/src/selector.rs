//! Target criteria for feature-based dependencies.

use crate::ids::{FeatureId, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TAG_PREFIX: &str = "tag:";

/// Selects features either by identity or by an advertised tag.
///
/// Textual form: `audit` selects the feature with id `audit`,
/// `tag:storage` selects every feature tagged `storage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeatureSelector {
    Id(FeatureId),
    Tag(Tag),
}

impl FeatureSelector {
    #[must_use]
    pub fn id(id: impl Into<FeatureId>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn tag(tag: impl Into<Tag>) -> Self {
        Self::Tag(tag.into())
    }

    #[must_use]
    pub fn matches(&self, id: &FeatureId, tags: &[Tag]) -> bool {
        match self {
            Self::Id(want) => want == id,
            Self::Tag(want) => tags.contains(want),
        }
    }
}

impl FromStr for FeatureSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let selector = raw
            .strip_prefix(TAG_PREFIX)
            .map_or_else(|| Self::Id(FeatureId::new(raw)), |tag| Self::Tag(Tag::new(tag.trim())));

        let blank = match &selector {
            Self::Id(id) => id.is_blank(),
            Self::Tag(tag) => tag.is_blank(),
        };
        if blank {
            return Err(format!("feature selector '{s}' is empty"));
        }

        Ok(selector)
    }
}

impl TryFrom<String> for FeatureSelector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeatureSelector> for String {
    fn from(selector: FeatureSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for FeatureSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Tag(tag) => write!(f, "{TAG_PREFIX}{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_tags() {
        assert_eq!("audit".parse::<FeatureSelector>().unwrap(), FeatureSelector::id("audit"));
        assert_eq!(
            "tag:storage".parse::<FeatureSelector>().unwrap(),
            FeatureSelector::tag("storage")
        );
        assert!("tag:".parse::<FeatureSelector>().is_err());
        assert!(" ".parse::<FeatureSelector>().is_err());
    }

    #[test]
    fn tag_selector_matches_any_carrier() {
        let storage = FeatureSelector::tag("storage");
        let tags = [Tag::from("storage"), Tag::from("sql")];

        assert!(storage.matches(&FeatureId::from("sqlite"), &tags));
        assert!(!storage.matches(&FeatureId::from("audit"), &[]));
        assert!(FeatureSelector::id("audit").matches(&FeatureId::from("audit"), &[]));
    }
}
