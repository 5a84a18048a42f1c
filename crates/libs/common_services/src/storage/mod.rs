mod client;
mod error;
mod object_key;
pub mod presign;

pub use client::*;
pub use error::*;
pub use object_key::*;
