pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::db::TurnoStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn TurnoStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Arc<dyn TurnoStore>, config: Config) -> Self {
        Self { db, config }
    }
}

pub fn build_router(state: AppState) -> Router {
    let prefix = state.config.api.mount_prefix();
    let docs = SwaggerUi::new(state.config.docs.path.clone()).url(
        state.config.docs.openapi_path.clone(),
        openapi::api_doc(&prefix),
    );

    let router = if prefix.is_empty() {
        Router::new().merge(api::routes())
    } else {
        Router::new().nest(&prefix, api::routes())
    };

    router
        .route("/health", get(api::health_check))
        .merge(docs)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Last-resort handler for requests whose handler panicked.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, "Error del servidor").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panics_become_plain_text_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Error del servidor");
    }
}
