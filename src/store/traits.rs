use serde_json::Value;

use crate::logic::{OverpassQuery, SparqlQuery};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid endpoint url {url}: {message}")]
    InvalidEndpoint { url: String, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("response body is not JSON: {0}")]
    Body(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// OpenStreetMap tag store (Overpass API)
#[async_trait::async_trait]
pub trait TagStore: Send + Sync {
    /// Run an Overpass query and return the raw JSON response
    async fn fetch_tags(&self, query: &OverpassQuery) -> Result<Value>;
}

/// Linked-data query service (Wikidata SPARQL endpoint)
#[async_trait::async_trait]
pub trait LinkedDataStore: Send + Sync {
    /// Run a SPARQL query and return the raw JSON results document
    async fn fetch_bindings(&self, query: &SparqlQuery) -> Result<Value>;
}

// Combined trait for convenience
pub trait Store: TagStore + LinkedDataStore {}

impl<T> Store for T where T: TagStore + LinkedDataStore {}
