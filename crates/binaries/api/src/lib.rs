#![allow(clippy::needless_for_each, clippy::missing_errors_doc)]

pub mod api_state;
pub mod routes;

pub use api_state::ApiState;
pub use routes::*;
