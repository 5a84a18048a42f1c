/// Strips leading and trailing slashes, e.g. `"/gallery/"` becomes `"gallery"`.
#[must_use]
pub fn trim_slashes(value: &str) -> String {
    value.trim().trim_matches('/').to_string()
}

/// Strips trailing slashes so a path can be appended with `format!("{base}/{path}")`.
#[must_use]
pub fn trim_trailing_slashes(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}
