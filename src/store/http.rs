use log::debug;
use reqwest::{header, Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::config::EndpointConfig;
use crate::logic::{OverpassQuery, SparqlQuery};
use crate::store::traits::{LinkedDataStore, Result, StoreError, TagStore};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Talks to the Overpass API and the Wikidata query service over HTTP
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    overpass: Url,
    sparql: Url,
}

impl HttpStore {
    /// Create a store for the configured endpoints
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(endpoints.agent.clone())
            .timeout(Duration::from_secs(endpoints.timeout))
            .build()?;

        Ok(Self {
            client,
            overpass: parse_endpoint(&endpoints.overpass)?,
            sparql: parse_endpoint(&endpoints.sparql)?,
        })
    }

    /// Full Overpass request URL, with the query percent-encoded into `data`
    pub fn tag_request_url(&self, query: &OverpassQuery) -> Url {
        let mut url = self.overpass.clone();
        url.query_pairs_mut().append_pair("data", query.as_str());
        url
    }

    /// Full SPARQL request URL, with the query percent-encoded into `query`
    pub fn bindings_request_url(&self, query: &SparqlQuery) -> Url {
        let mut url = self.sparql.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("query", query.as_str());
        url
    }

    async fn get_json(&self, url: Url, accept: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Body(e.to_string()))
    }
}

fn parse_endpoint(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| StoreError::InvalidEndpoint {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[async_trait::async_trait]
impl TagStore for HttpStore {
    async fn fetch_tags(&self, query: &OverpassQuery) -> Result<Value> {
        self.get_json(self.tag_request_url(query), "application/json")
            .await
    }
}

#[async_trait::async_trait]
impl LinkedDataStore for HttpStore {
    async fn fetch_bindings(&self, query: &SparqlQuery) -> Result<Value> {
        self.get_json(self.bindings_request_url(query), SPARQL_RESULTS_JSON)
            .await
    }
}
