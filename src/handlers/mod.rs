use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    db::{delivery_store::DeliveryStore, note_store::NoteStore},
    services::GenerationService,
};

pub mod calc;
pub mod calendar;
pub mod delivery;
pub mod note;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub deliveries: Arc<DeliveryStore>,
    pub notes: Arc<NoteStore>,
    pub generator: Arc<GenerationService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/deliveries",
            get(delivery::list_deliveries).post(delivery::create_delivery),
        )
        .route("/deliveries/options", get(delivery::get_options))
        .route(
            "/deliveries/{id}",
            get(delivery::get_delivery).delete(delivery::delete_delivery),
        )
        .route("/deliveries/{id}/date", patch(delivery::reschedule_delivery))
        .route("/calendar", get(calendar::get_calendar))
        .route("/notes", get(note::list_notes).post(note::create_note))
        .route("/notes/generate", post(note::generate_note))
        .route("/calc", post(calc::calculate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "Delivery desk is running."
}
