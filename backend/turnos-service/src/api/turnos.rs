use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::error::{ApiError, Result};
use crate::models::{
    CreateTurnoRequest, ListTurnosResponse, MessageResponse, Turno, UpdateFechaRequest,
    TURNO_ELIMINADO,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/turnos", get(list_turnos).post(create_turno))
        .route("/turnos/:id", put(update_fecha).delete(delete_turno))
}

/// Obtiene todos los turnos.
#[utoipa::path(
    get,
    path = "/turnos",
    tag = "turnos",
    responses(
        (status = 200, description = "Lista de turnos, o un mensaje si no hay turnos por atender", body = ListTurnosResponse),
        (status = 500, description = "Error al obtener los turnos", body = crate::models::ErrorResponse)
    )
)]
pub async fn list_turnos(State(state): State<AppState>) -> Result<Json<ListTurnosResponse>> {
    let turnos = state.db.list().await.map_err(ApiError::list)?;
    Ok(Json(turnos.into()))
}

/// Crea un nuevo turno.
#[utoipa::path(
    post,
    path = "/turnos",
    tag = "turnos",
    request_body = CreateTurnoRequest,
    responses(
        (status = 200, description = "Turno creado correctamente", body = Turno),
        (status = 500, description = "Error al crear el turno", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_turno(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateTurnoRequest>, JsonRejection>,
) -> Result<Json<Turno>> {
    let Json(request) = payload.map_err(ApiError::create)?;
    let nuevo = request
        .into_nuevo(state.config.api.require_fecha)
        .map_err(ApiError::create)?;

    let turno = state.db.create(nuevo).await.map_err(ApiError::create)?;
    tracing::debug!(id = %turno.id, "turno created");

    Ok(Json(turno))
}

/// Actualiza la fecha de un turno existente.
#[utoipa::path(
    put,
    path = "/turnos/{id}",
    tag = "turnos",
    params(
        ("id" = String, Path, description = "ID del turno a actualizar")
    ),
    request_body = UpdateFechaRequest,
    responses(
        (status = 200, description = "Fecha del turno actualizada correctamente, o null si el turno no existe", body = Option<Turno>),
        (status = 500, description = "Error al cambiar la fecha del turno", body = crate::models::ErrorResponse)
    )
)]
pub async fn update_fecha(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateFechaRequest>, JsonRejection>,
) -> Result<Json<Option<Turno>>> {
    let Json(request) = payload.map_err(ApiError::update_fecha)?;
    let fecha = request
        .into_fecha(state.config.api.require_fecha)
        .map_err(ApiError::update_fecha)?;

    let turno = state
        .db
        .update_fecha(&id, fecha)
        .await
        .map_err(ApiError::update_fecha)?;

    if turno.is_none() {
        tracing::debug!(%id, "update matched no turno");
    }

    Ok(Json(turno))
}

/// Elimina un turno existente.
#[utoipa::path(
    delete,
    path = "/turnos/{id}",
    tag = "turnos",
    params(
        ("id" = String, Path, description = "ID del turno a eliminar")
    ),
    responses(
        (status = 200, description = "Turno eliminado correctamente", body = MessageResponse),
        (status = 500, description = "Error al eliminar el turno", body = crate::models::ErrorResponse)
    )
)]
pub async fn delete_turno(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.db.delete(&id).await.map_err(ApiError::delete)?;

    Ok(Json(MessageResponse {
        message: TURNO_ELIMINADO.to_string(),
    }))
}
