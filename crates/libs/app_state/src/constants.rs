/// Content types accepted for photo uploads, compared lower-cased.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/heic",
];

#[must_use]
pub fn is_allowed_image_type(content_type: &str) -> bool {
    let lowered = content_type.trim().to_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_are_case_insensitive() {
        assert!(is_allowed_image_type("IMAGE/JPEG"));
        assert!(is_allowed_image_type("image/heic"));
        assert!(!is_allowed_image_type("image/gif"));
        assert!(!is_allowed_image_type("application/pdf"));
    }
}
