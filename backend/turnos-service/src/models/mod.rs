mod response;
mod turno;

pub use response::*;
pub use turno::*;
