//! Field-level validation predicates shared by the form view models.
//! Each form owns its error messages; these only answer yes/no.

use regex::Regex;
use std::sync::OnceLock;

/// Punctuation accepted by the password strength rule.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
    })
}

fn simple_email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("simple email pattern"))
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ\s\-']+$").expect("name pattern"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s\-()]{10,15}$").expect("phone pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Looser pattern used by the user management form.
pub fn is_plausible_email(email: &str) -> bool {
    simple_email_regex().is_match(email)
}

/// Minimum 8 characters with at least one lowercase letter, one uppercase
/// letter, one digit and one symbol from [`PASSWORD_SYMBOLS`].
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Letters (Latin or Cyrillic), spaces, hyphens and apostrophes, 2 to 50
/// characters.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (2..=50).contains(&len) && name_regex().is_match(name)
}

/// Empty phone numbers are fine, the field is optional everywhere.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.is_empty() || phone_regex().is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_standard_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.kz"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@host"));
        assert!(!is_valid_email("user@host.c"));
        assert!(!is_valid_email("us er@host.com"));
    }

    #[test]
    fn plausible_email_is_looser() {
        assert!(is_plausible_email("u@h.x"));
        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("a b@h.x"));
    }

    #[test]
    fn strong_password_requires_all_character_classes() {
        assert!(is_strong_password("Aa1!aaaa"));
        assert!(!is_strong_password("Aa1!aaa")); // 7 chars
        assert!(!is_strong_password("aa1!aaaa")); // no uppercase
        assert!(!is_strong_password("AA1!AAAA")); // no lowercase
        assert!(!is_strong_password("Aaa!aaaa")); // no digit
        assert!(!is_strong_password("Aa1aaaaa")); // no symbol
    }

    #[test]
    fn names_allow_cyrillic_hyphens_and_apostrophes() {
        assert!(is_valid_name("Айгерим"));
        assert!(is_valid_name("Anna-Maria"));
        assert!(is_valid_name("O'Brien"));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name("Иван123"));
        assert!(!is_valid_name(&"ы".repeat(51)));
    }

    #[test]
    fn phone_is_optional_but_checked_when_present() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("+7(701)1234567"));
        assert!(is_valid_phone("8 701 123-45-67"));
        assert!(is_valid_phone("87011234567"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("abc1234567"));
        assert!(!is_valid_phone("+7 (701) 123-45-67-89-01")); // too long
    }
}
