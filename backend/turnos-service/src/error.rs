use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::StoreError;
use crate::models::ErrorResponse;

/// What went wrong underneath an endpoint failure. Never shown to clients.
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

/// One failure per endpoint. Every variant renders as a 500 carrying only the
/// endpoint's fixed message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error al obtener los turnos")]
    List(#[source] Cause),

    #[error("Error al crear el turno")]
    Create(#[source] Cause),

    #[error("Error al cambiar la fecha del turno")]
    UpdateFecha(#[source] Cause),

    #[error("Error al eliminar el turno")]
    Delete(#[source] Cause),
}

impl ApiError {
    pub fn list(cause: impl Into<Cause>) -> Self {
        Self::List(cause.into())
    }

    pub fn create(cause: impl Into<Cause>) -> Self {
        Self::Create(cause.into())
    }

    pub fn update_fecha(cause: impl Into<Cause>) -> Self {
        Self::UpdateFecha(cause.into())
    }

    pub fn delete(cause: impl Into<Cause>) -> Self {
        Self::Delete(cause.into())
    }

    pub fn cause(&self) -> &Cause {
        match self {
            ApiError::List(cause)
            | ApiError::Create(cause)
            | ApiError::UpdateFecha(cause)
            | ApiError::Delete(cause) => cause,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(cause = %self.cause(), "{}", self);

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_failure_is_a_500_with_a_fixed_message() {
        let response = ApiError::delete(StoreError::InvalidId("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Error al eliminar el turno" }));
    }

    #[test]
    fn cause_is_kept_for_logging() {
        let err = ApiError::update_fecha(StoreError::InvalidId("abc".into()));
        assert_eq!(err.to_string(), "Error al cambiar la fecha del turno");
        assert!(matches!(err.cause(), Cause::Store(StoreError::InvalidId(id)) if id == "abc"));
    }
}
