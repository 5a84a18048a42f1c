mod place_submission;

pub use place_submission::*;
