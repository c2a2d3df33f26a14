//! Institutional email rules.
//!
//! There is no authentication on the board. Restricting registrations to
//! addresses on academic domains stands in for "members only".

use regex::Regex;
use std::sync::LazyLock;

/// `local@domain.tld`, no whitespace, exactly one `@`
#[allow(clippy::expect_used)]
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern should compile")
});

/// A domain segment marking an academic or institutional host
#[allow(clippy::expect_used)]
static INSTITUTION_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@.*\.(edu|ac\.|univ\.|institution\.)")
        .expect("hardcoded institution pattern should compile")
});

/// Trim and lower-case an address. Every stored or compared email goes through this.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether `email` looks like `local@domain.tld`
#[must_use]
pub fn has_email_shape(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Whether the domain of `email` carries an institutional marker
/// (`.edu`, `.ac.`, `.univ.` or `.institution.`), case-insensitively
#[must_use]
pub fn is_institutional(email: &str) -> bool {
    INSTITUTION_DOMAIN.is_match(email)
}

/// Both checks: well-formed and institutional.
///
/// # Examples
///
/// ```
/// use event_board::email::is_valid_email;
///
/// assert!(is_valid_email("a@b.edu"));
/// assert!(!is_valid_email("a@b.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    has_email_shape(email) && is_institutional(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_institutional_addresses() {
        assert!(is_valid_email("a@b.edu"));
        assert!(is_valid_email("jane.doe@cs.stanford.edu"));
        assert!(is_valid_email("student@ox.ac.uk"));
        assert!(is_valid_email("prof@lettres.univ.fr"));
        assert!(is_valid_email("staff@mail.institution.org"));
        assert!(is_valid_email("LOUD@CAMPUS.EDU"));
    }

    #[test]
    fn rejects_non_institutional_domains() {
        assert!(!is_valid_email("a@b.com"));
        assert!(!is_valid_email("someone@gmail.com"));
        assert!(!is_valid_email("edu@example.com"));
        assert!(has_email_shape("a@b.com"));
        assert!(!is_institutional("a@b.com"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@b.edu"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.edu"));
        assert!(!is_valid_email("a@@b.edu"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn normalisation_trims_and_lowercases() {
        assert_eq!(normalize_email("  Jane@Uni.EDU\t"), "jane@uni.edu");
    }
}
