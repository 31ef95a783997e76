use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::contacts::adapters::inbound::http as contacts_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(contacts_http::find_all)
                .post(contacts_http::create)
                .patch(contacts_http::add_number),
        )
        .route(
            "/contacts/{key}",
            get(contacts_http::find_one).delete(contacts_http::delete_contact),
        )
        .route("/contacts/{key}/filter", get(contacts_http::filter))
        .route("/contacts/{key}/contact", patch(contacts_http::patch_contact))
        .route("/contacts/{key}/number", patch(contacts_http::patch_number))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
