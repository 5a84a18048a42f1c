use sanitize_filename::sanitize;

const RANDOM_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 6;

/// Lower-case base36 noise so two uploads in the same millisecond don't collide.
#[must_use]
pub fn random_suffix() -> String {
    (0..RANDOM_LEN)
        .map(|_| RANDOM_ALPHABET[fastrand::usize(..RANDOM_ALPHABET.len())] as char)
        .collect()
}

/// Makes a user supplied file name safe to embed in an object key and URL.
#[must_use]
pub fn clean_file_name(file_name: &str) -> String {
    let cleaned: String = sanitize(file_name.trim())
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned
    }
}

/// `{prefix}/{unix_millis}-{random}-{file_name}`.
#[must_use]
pub fn object_key(prefix: &str, file_name: &str, unix_millis: i64, random: &str) -> String {
    let name = clean_file_name(file_name);
    if prefix.is_empty() {
        format!("{unix_millis}-{random}-{name}")
    } else {
        format!("{prefix}/{unix_millis}-{random}-{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_layout() {
        assert_eq!(
            object_key("gallery", "my place.jpg", 1_763_628_951_379, "xdork1"),
            "gallery/1763628951379-xdork1-my-place.jpg"
        );
        assert_eq!(object_key("", "a.png", 1, "abcdef"), "1-abcdef-a.png");
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(clean_file_name("my/photo?.jpg"), "myphoto.jpg");
        assert_eq!(clean_file_name("   "), "photo");
    }

    #[test]
    fn suffix_is_base36() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), RANDOM_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
