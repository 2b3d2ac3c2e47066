//! OpenAPI documentation for the turnos service

use utoipa::OpenApi;

use crate::api::turnos;
use crate::models::{
    CreateTurnoRequest, ErrorResponse, ListTurnosResponse, MensajeResponse, MessageResponse, Turno,
    UpdateFechaRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Turnos",
        version = "1.0.0",
        description = "Gestión de turnos de la veterinaria: alta, listado, cambio de fecha y baja.",
        license(
            name = "MIT"
        )
    ),
    paths(
        turnos::list_turnos,
        turnos::create_turno,
        turnos::update_fecha,
        turnos::delete_turno
    ),
    components(schemas(
        Turno,
        ListTurnosResponse,
        CreateTurnoRequest,
        UpdateFechaRequest,
        MensajeResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "turnos", description = "Turnos de la veterinaria")
    )
)]
pub struct ApiDoc;

/// The document with every path moved under the mount prefix the router uses.
pub fn api_doc(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !prefix.is_empty() {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| (format!("{prefix}{path}"), item))
            .collect();
    }
    doc
}
