use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use log::debug;
use std::sync::Arc;

use crate::api::session_extractor::SessionKey;
use crate::logic::{LanguagePreference, Resolver, SessionRegistry};
use crate::model::{CompositeIdentifier, TappedFeature};
use crate::store::traits::Store;

/// Shared state of the HTTP surface
pub struct ApiState<S: Store> {
    pub resolver: Resolver<S>,
    pub sessions: SessionRegistry,
}

impl<S: Store> ApiState<S> {
    pub fn new(resolver: Resolver<S>) -> Self {
        Self {
            resolver,
            sessions: SessionRegistry::new(),
        }
    }
}

pub type AppState<S> = Arc<ApiState<S>>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    /// Style layer the feature was hit on
    pub layer: String,
    /// Comma separated label languages, overriding the configured ones
    pub languages: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GalleryRequest {
    #[serde(flatten)]
    pub feature: TappedFeature,
    pub languages: Option<LanguagePreference>,
}

/// Gallery for a feature identified only by its composite id
pub async fn get_feature_gallery<S: Store>(
    State(state): State<AppState<S>>,
    Path(composite_id): Path<CompositeIdentifier>,
    Query(query): Query<GalleryQuery>,
    session: SessionKey,
) -> Response {
    let languages = query.languages.as_deref().map(LanguagePreference::parse_list);
    let feature = TappedFeature::new(composite_id, query.layer);
    run_chain(&state, feature, languages, session).await
}

/// Gallery for a feature the map layer already looked up tags for
pub async fn post_feature_gallery<S: Store>(
    State(state): State<AppState<S>>,
    session: SessionKey,
    RequestJson(request): RequestJson<GalleryRequest>,
) -> Response {
    run_chain(&state, request.feature, request.languages, session).await
}

async fn run_chain<S: Store>(
    state: &ApiState<S>,
    feature: TappedFeature,
    languages: Option<LanguagePreference>,
    session: SessionKey,
) -> Response {
    let languages = languages.unwrap_or_else(|| state.resolver.languages().clone());
    // Held until the chain is done; releases the session entry on drop
    let lease = session.0.as_deref().map(|key| state.sessions.begin(key));
    let token = lease
        .as_ref()
        .map(|lease| lease.token().clone())
        .unwrap_or_default();
    debug!("{} sessions with a chain in flight", state.sessions.len());

    match state.resolver.resolve_with(&feature, &languages, &token).await {
        Some(gallery) => Json(gallery).into_response(),
        // Superseded by a newer request from the same session
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
