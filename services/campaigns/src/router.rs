use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use relaya_core::health::{healthz, readyz};
use relaya_core::middleware::request_id_layer;

use crate::handlers::{
    campaign::{create_campaign, get_campaign, list_campaigns},
    connect::{connect_callback, disconnect, start_connect},
    credential::list_credentials,
    post::{create_post, get_post, list_posts},
    proposal::queue_proposal,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Campaigns
        .route("/campaigns", post(create_campaign))
        .route("/campaigns", get(list_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
        // Posts
        .route("/posts", post(create_post))
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        // Connections
        .route("/connect/{platform}", get(start_connect))
        .route("/connect/{platform}", delete(disconnect))
        .route("/connect/{platform}/callback", get(connect_callback))
        .route("/credentials", get(list_credentials))
        // Proposals
        .route("/proposals", post(queue_proposal))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
