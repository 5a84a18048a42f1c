mod gallery;
mod photo;
mod submission;
mod upload;

pub use gallery::*;
pub use photo::*;
pub use submission::*;
pub use upload::*;
