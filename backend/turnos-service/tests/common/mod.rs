#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use turnos_service::config::{
    ApiConfig, Config, DatabaseConfig, DocsConfig, LogConfig, LogFormat, ServerConfig,
    StoreBackend, StoreConfig,
};
use turnos_service::db::{InMemoryTurnoStore, TurnoStore};
use turnos_service::{build_router, AppState};

pub fn test_config(prefix: &str, require_fecha: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "mongodb://localhost:27017/veterinaria_test".to_string(),
            name: "veterinaria_test".to_string(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        api: ApiConfig {
            prefix: prefix.to_string(),
            require_fecha,
        },
        docs: DocsConfig {
            path: "/api-docs".to_string(),
            openapi_path: "/openapi.json".to_string(),
        },
        log: LogConfig {
            format: LogFormat::Pretty,
        },
    }
}

pub fn router_with_store(store: Arc<dyn TurnoStore>, config: Config) -> Router {
    build_router(AppState::new(store, config))
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, bytes.to_vec())
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryTurnoStore>,
}

impl TestApp {
    pub fn new(prefix: &str, require_fecha: bool) -> Self {
        let store = Arc::new(InMemoryTurnoStore::new());
        Self {
            router: router_with_store(store.clone(), test_config(prefix, require_fecha)),
            store,
        }
    }

    /// Default configuration: `/api` prefix, `fecha` required.
    pub fn default_config() -> Self {
        Self::new("/api", true)
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        send(&self.router, method, uri, body).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|b| b.to_string());
        let (status, bytes) = self.request(method, uri, body.as_deref()).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
