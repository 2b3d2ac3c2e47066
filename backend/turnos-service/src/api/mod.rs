mod health;
pub mod turnos;

use axum::Router;
use crate::AppState;

pub use health::health_check;

pub fn routes() -> Router<AppState> {
    Router::new().merge(turnos::routes())
}
