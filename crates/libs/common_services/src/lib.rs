#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_sign_loss,
    clippy::module_inception,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod api;
pub mod database;
pub mod storage;
