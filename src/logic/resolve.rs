use log::{debug, warn};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::logic::normalize::normalize_image_links;
use crate::logic::parse::{parse_bindings, parse_tags};
use crate::logic::query::{
    LanguagePreference, OverpassQuery, SparqlQuery, LABEL_VARIABLE, PICTURE_VARIABLE,
};
use crate::model::{EntityReference, Gallery, TagMap, TappedFeature, WikidataId};
use crate::store::traits::{Store, StoreError};

/// Resolves a tapped bridge into images of structures by the same architect.
///
/// Each stage short-circuits to "nothing to show": an unknown layer or
/// identifier, a failed request, unparseable JSON, a missing `wikidata` tag.
/// None of these reach the caller as errors.
pub struct Resolver<S: Store> {
    store: Arc<S>,
    languages: LanguagePreference,
}

impl<S: Store> Resolver<S> {
    pub fn new(store: Arc<S>, languages: LanguagePreference) -> Self {
        Self { store, languages }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn languages(&self) -> &LanguagePreference {
        &self.languages
    }

    /// Run the chain to completion with the configured languages
    pub async fn resolve(&self, feature: &TappedFeature) -> Gallery {
        self.resolve_with(feature, &self.languages, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// Run the chain under `token`. `None` means the chain was superseded and
    /// must not deliver anything.
    pub async fn resolve_with(
        &self,
        feature: &TappedFeature,
        languages: &LanguagePreference,
        token: &CancellationToken,
    ) -> Option<Gallery> {
        let gallery = self.run_stages(feature, languages, token).await?;
        if token.is_cancelled() {
            debug!("Chain for {} superseded before delivery", feature.composite_id);
            return None;
        }
        Some(gallery)
    }

    async fn run_stages(
        &self,
        feature: &TappedFeature,
        languages: &LanguagePreference,
        token: &CancellationToken,
    ) -> Option<Gallery> {
        if !feature.is_bridge() {
            debug!("Ignoring feature on non-bridge layer {}", feature.layer);
            return Some(Gallery::empty());
        }

        // Stage 1: decode
        let Some(entity) = EntityReference::decode(feature.composite_id) else {
            debug!("Composite id {} does not name a single element", feature.composite_id);
            return Some(Gallery::empty());
        };

        // Stage 2: tags, from the map layer if it already looked them up
        let tags = match &feature.tags {
            Some(tags) => Some(tags.clone()),
            None => self.fetch_tags(&entity, token).await?,
        };
        let Some(tags) = tags else {
            return Some(Gallery::empty());
        };

        // Stage 3: cross-reference
        let Some(item) = WikidataId::from_tags(&tags) else {
            debug!("{} carries no usable wikidata tag", entity);
            return Some(Gallery::empty());
        };

        // Stage 4: related images
        self.fetch_gallery(&item, languages, token).await
    }

    /// `None` if cancelled, `Some(None)` if there are no tags to work with
    async fn fetch_tags(
        &self,
        entity: &EntityReference,
        token: &CancellationToken,
    ) -> Option<Option<TagMap>> {
        let query = OverpassQuery::for_entity(entity);
        let response = until_cancelled(token, self.store.fetch_tags(&query)).await?;
        Some(match response {
            Ok(response) => {
                let tags = parse_tags(&response);
                if tags.is_none() {
                    debug!("No tags in Overpass response for {}", entity);
                }
                tags
            }
            Err(e) => {
                warn!("Tag lookup for {} failed: {}", entity, e);
                None
            }
        })
    }

    async fn fetch_gallery(
        &self,
        item: &WikidataId,
        languages: &LanguagePreference,
        token: &CancellationToken,
    ) -> Option<Gallery> {
        let query = SparqlQuery::related_images(item, languages);
        let response = until_cancelled(token, self.store.fetch_bindings(&query)).await?;
        Some(gallery_from_response(item, response))
    }
}

fn gallery_from_response(item: &WikidataId, response: Result<Value, StoreError>) -> Gallery {
    let response = match response {
        Ok(response) => response,
        Err(e) => {
            warn!("Related image query for {} failed: {}", item, e);
            return Gallery::empty();
        }
    };

    let Some(results) = parse_bindings(&response) else {
        debug!("Malformed SPARQL results for {}", item);
        return Gallery::empty();
    };

    let gallery = Gallery {
        label: results.first_value(LABEL_VARIABLE).map(str::to_string),
        images: normalize_image_links(results.values(PICTURE_VARIABLE)),
    };
    debug!("{} resolved to {} related images", item, gallery.images.len());
    gallery
}

/// Race `future` against cancellation of `token`
async fn until_cancelled<F: Future>(token: &CancellationToken, future: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = future => Some(output),
    }
}
