use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::CompositeIdentifier;

/// OpenStreetMap tags of one element
pub type TagMap = BTreeMap<String, String>;

/// Tag key that links an OpenStreetMap element to its Wikidata item
pub const WIKIDATA_TAG: &str = "wikidata";

/// Style layers that draw bridge structures. Taps on any other layer are ignored.
pub const BRIDGE_LAYERS: &[&str] = &[
    "bridge-case-simple",
    "bridge-construction",
    "bridge-major-link",
    "bridge-major-link-2",
    "bridge-major-link-2-case",
    "bridge-major-link-case",
    "bridge-minor",
    "bridge-minor-case",
    "bridge-minor-link",
    "bridge-motorway-trunk",
    "bridge-motorway-trunk-2",
    "bridge-motorway-trunk-2-case",
    "bridge-motorway-trunk-case",
    "bridge-oneway-arrow-blue",
    "bridge-oneway-arrow-white",
    "bridge-path",
    "bridge-path-bg",
    "bridge-path-cycleway-piste",
    "bridge-path-trail",
    "bridge-pedestrian",
    "bridge-primary-secondary-tertiary",
    "bridge-primary-secondary-tertiary-case",
    "bridge-rail",
    "bridge-rail-tracks",
    "bridge-simple",
    "bridge-steps",
    "bridge-street",
    "bridge-street-case",
    "bridge-street-limited",
    "bridge-street-low",
];

pub fn is_bridge_layer(layer: &str) -> bool {
    BRIDGE_LAYERS.contains(&layer)
}

/// Wikidata item identifier such as `Q42`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WikidataId(String);

impl WikidataId {
    /// Accepts `Q` followed by a positive number without leading zeros,
    /// ignoring surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let digits = value.strip_prefix('Q')?.as_bytes();
        let (first, rest) = digits.split_first()?;
        if !matches!(*first, b'1'..=b'9') || !rest.iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(Self(value.to_string()))
    }

    /// Pull the cross-reference out of an element's tags
    pub fn from_tags(tags: &TagMap) -> Option<Self> {
        tags.get(WIKIDATA_TAG).and_then(|value| Self::parse(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WikidataId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A feature the user pressed on the map, as resolved by the map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TappedFeature {
    /// Renderer composite identifier
    pub composite_id: CompositeIdentifier,
    /// Style layer the feature was hit on
    pub layer: String,
    /// Tags already looked up by the map layer, if any
    #[serde(default)]
    pub tags: Option<TagMap>,
}

impl TappedFeature {
    pub fn new(composite_id: CompositeIdentifier, layer: impl Into<String>) -> Self {
        Self {
            composite_id,
            layer: layer.into(),
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: TagMap) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_bridge(&self) -> bool {
        is_bridge_layer(&self.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_wikidata_id_parsing() {
        assert_eq!(WikidataId::parse("Q42").unwrap().as_str(), "Q42");
        assert_eq!(WikidataId::parse(" Q100 ").unwrap().as_str(), "Q100");
        assert!(WikidataId::parse("12345").is_none());
        assert!(WikidataId::parse("Q").is_none());
        assert!(WikidataId::parse("q42").is_none());
        assert!(WikidataId::parse("Q42;Q43").is_none());
        assert!(WikidataId::parse("").is_none());
    }

    #[test]
    fn test_wikidata_id_rejects_zero_and_leading_zeros() {
        assert!(WikidataId::parse("Q0").is_none());
        assert!(WikidataId::parse("Q007").is_none());
        assert!(WikidataId::parse("Q01").is_none());
        assert_eq!(WikidataId::parse("Q10").unwrap().as_str(), "Q10");
        assert_eq!(WikidataId::parse("Q1").unwrap().as_str(), "Q1");
    }

    #[test]
    fn test_wikidata_id_from_tags() {
        let bridge = tags(&[("man_made", "bridge"), ("wikidata", "Q100")]);
        assert_eq!(WikidataId::from_tags(&bridge).unwrap().to_string(), "Q100");

        let unlinked = tags(&[("man_made", "bridge")]);
        assert!(WikidataId::from_tags(&unlinked).is_none());

        let malformed = tags(&[("wikidata", "12345")]);
        assert!(WikidataId::from_tags(&malformed).is_none());
    }

    #[test]
    fn test_bridge_layers() {
        assert!(is_bridge_layer("bridge-street"));
        assert!(is_bridge_layer("bridge-rail"));
        assert!(!is_bridge_layer("road-street"));
        assert!(!is_bridge_layer("tunnel-street"));
        assert!(TappedFeature::new(421, "bridge-motorway-trunk").is_bridge());
    }

    #[test]
    fn test_tapped_feature_deserialization() {
        let feature: TappedFeature = serde_json::from_value(serde_json::json!({
            "composite_id": 421,
            "layer": "bridge-street",
        }))
        .unwrap();
        assert_eq!(feature, TappedFeature::new(421, "bridge-street"));

        let feature: TappedFeature = serde_json::from_value(serde_json::json!({
            "composite_id": 421,
            "layer": "bridge-street",
            "tags": {"wikidata": "Q100"},
        }))
        .unwrap();
        assert_eq!(feature.tags, Some(tags(&[("wikidata", "Q100")])));
    }
}
