mod place_submission_store;

pub use place_submission_store::*;
