use serde::Serialize;
use utoipa::ToSchema;

use super::Turno;

pub const NO_HAY_TURNOS: &str = "No hay turnos por atender";
pub const TURNO_ELIMINADO: &str = "Turno eliminado correctamente";

/// Listing either returns the turnos or, when there are none, a message.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ListTurnosResponse {
    Turnos(Vec<Turno>),
    Vacio(MensajeResponse),
}

impl From<Vec<Turno>> for ListTurnosResponse {
    fn from(turnos: Vec<Turno>) -> Self {
        if turnos.is_empty() {
            Self::Vacio(MensajeResponse {
                mensaje: NO_HAY_TURNOS.to_string(),
            })
        } else {
            Self::Turnos(turnos)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MensajeResponse {
    #[schema(example = "No hay turnos por atender")]
    pub mensaje: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Turno eliminado correctamente")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Error al crear el turno")]
    pub error: String,
}
