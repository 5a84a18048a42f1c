use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email regex is valid")
});

/// Loose shape check: something@something.something, no whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jiwoo@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.kr"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email(""));
    }
}
