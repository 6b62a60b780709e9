pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{
    normalize_image_link, normalize_image_links, parse_bindings, parse_tags, ChainSupervisor,
    LanguagePreference, OverpassQuery, Resolver, SessionRegistry, SparqlQuery,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{HttpStore, LinkedDataStore, Store, StoreError, TagStore};

/// Build the router for a resolver over `store`
pub fn build_app<S: Store + 'static>(
    store: S,
    languages: LanguagePreference,
) -> axum::Router {
    use std::sync::Arc;

    let resolver = Resolver::new(Arc::new(store), languages);
    let state = Arc::new(api::handlers::ApiState::new(resolver));
    api::routes::create_router::<S>().with_state(state)
}
