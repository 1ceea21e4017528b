use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::mentor::MentorService;

pub struct AppState {
    pub mentor: MentorService,
    pub static_dir: PathBuf,
    pub allowed_origin: Option<HeaderValue>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let origin: AllowOrigin = match &state.allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => Any.into(),
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/ai-mentor", get(handlers::ai_mentor))
        .route("/chart-screenshots", get(handlers::chart_screenshots))
        .route("/health", get(handlers::health))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
