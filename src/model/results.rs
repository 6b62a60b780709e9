use reqwest::Url;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// One result row: query variable name to its literal value
pub type Binding = HashMap<String, String>;

/// Rows of a SPARQL result in the order the service returned them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResultSet {
    pub bindings: Vec<Binding>,
}

impl QueryResultSet {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Value of `variable` from the first row that binds it
    pub fn first_value(&self, variable: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find_map(|binding| binding.get(variable))
            .map(String::as_str)
    }

    /// Values of `variable` across all rows, skipping rows that leave it unbound
    pub fn values<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.bindings
            .iter()
            .filter_map(move |binding| binding.get(variable))
            .map(String::as_str)
    }
}

/// An image URL that has been upgraded to https
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageLink(Url);

impl ImageLink {
    pub(crate) fn from_url(url: Url) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ImageLink {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ImageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Related imagery for one tapped feature, handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Gallery {
    /// Architect label in the preferred language, when the service provided one
    pub label: Option<String>,
    pub images: Vec<ImageLink>,
}

impl Gallery {
    /// Nothing to show
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.images.is_empty()
    }
}
