pub mod cities;
pub mod gallery;
pub mod submissions;
pub mod upload;
