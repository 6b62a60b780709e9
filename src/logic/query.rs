use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{EntityReference, WikidataId};

/// Label language used when none of the preferred ones has a label
pub const FALLBACK_LANGUAGE: &str = "en";

/// Result variable carrying the image URL
pub const PICTURE_VARIABLE: &str = "pic";
/// Result variable carrying the architect's label
pub const LABEL_VARIABLE: &str = "architectLabel";

/// Wikidata "architect" property shared by the queried item and its siblings
const RELATION_PROPERTY: &str = "P84";
/// Wikidata "image" property
const IMAGE_PROPERTY: &str = "P18";

/// Overpass QL query selecting one element's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery(String);

impl OverpassQuery {
    pub fn for_entity(entity: &EntityReference) -> Self {
        Self(format!("[out:json];{};out;", entity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// SPARQL query against the Wikidata query service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery(String);

impl SparqlQuery {
    /// Images of every item sharing an architect with `item`, plus that
    /// architect's label in the preferred languages
    pub fn related_images(item: &WikidataId, languages: &LanguagePreference) -> Self {
        Self(format!(
            "SELECT ?{pic} ?{label} WHERE {{ \
             wd:{item} wdt:{rel} ?architect . \
             ?item wdt:{rel} ?architect . \
             ?item wdt:{img} ?{pic} . \
             SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{langs}\" }} \
             }}",
            pic = PICTURE_VARIABLE,
            label = LABEL_VARIABLE,
            item = item,
            rel = RELATION_PROPERTY,
            img = IMAGE_PROPERTY,
            langs = languages.directive(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered label languages, always ending in the universal fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LanguagePreference {
    codes: Vec<String>,
}

impl LanguagePreference {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes: Vec<String> = codes
            .into_iter()
            .map(|code| code.as_ref().trim().to_lowercase())
            .filter(|code| !code.is_empty() && code != FALLBACK_LANGUAGE)
            .unique()
            .collect();
        codes.push(FALLBACK_LANGUAGE.to_string());
        Self { codes }
    }

    /// Parse a comma separated list such as `de,fr`
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Comma joined form for the label service
    pub fn directive(&self) -> String {
        self.codes.iter().join(",")
    }
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl From<Vec<String>> for LanguagePreference {
    fn from(codes: Vec<String>) -> Self {
        Self::new(codes)
    }
}

impl From<LanguagePreference> for Vec<String> {
    fn from(languages: LanguagePreference) -> Self {
        languages.codes
    }
}
