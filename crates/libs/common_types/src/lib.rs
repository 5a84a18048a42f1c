#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod api;
pub mod countries;
mod database;
pub mod image_url;
mod screen_position;
mod validation;

pub use api::*;
pub use database::*;
pub use screen_position::*;
pub use validation::*;
