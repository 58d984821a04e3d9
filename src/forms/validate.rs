//! Field-level checks shared by every form.

/// Longest address accepted, per the SMTP path limit.
const MAX_EMAIL_LEN: usize = 254;
const MIN_PHONE_DIGITS: usize = 8;
const MAX_PHONE_DIGITS: usize = 15;

/// Strip visual separators from a phone number and turn a `00` international
/// prefix into `+`.
///
/// `"0020 (10) 1234-5678"` → `"+201012345678"`. The result is only a
/// candidate; check it with [`is_valid_phone`].
pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')' | '\u{a0}'))
        .collect();
    match compact.strip_prefix("00") {
        Some(rest) => format!("+{rest}"),
        None => compact,
    }
}

/// A normalized phone number: optional leading `+`, then 8 to 15 digits.
pub fn is_valid_phone(normalized: &str) -> bool {
    let digits = normalized.strip_prefix('+').unwrap_or(normalized);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
}

/// Shape check for `local@domain.tld`. Deliverability is the mail provider's job.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_alphabetic()))
}

/// Length in characters, not bytes: Arabic text is two bytes per letter.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_separators() {
        assert_eq!(normalize_phone(" +20 (10) 1234-5678 "), "+201012345678");
        assert_eq!(normalize_phone("050.123.4567"), "0501234567");
    }

    #[test]
    fn normalize_converts_double_zero() {
        assert_eq!(normalize_phone("00971 50 123 4567"), "+971501234567");
    }

    #[test]
    fn valid_phones() {
        assert!(is_valid_phone("+201012345678"));
        assert!(is_valid_phone("01012345678"));
        assert!(is_valid_phone("0501234567"));
        assert!(is_valid_phone("12345678"));
    }

    #[test]
    fn invalid_phones() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("+1234567890123456"));
        assert!(!is_valid_phone("010-abc-5678"));
        assert!(!is_valid_phone("++201012345678"));
    }

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("omar@example.com"));
        assert!(is_valid_email("first.last+ppf@mail.example.ae"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email("omar"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("omar@example"));
        assert!(!is_valid_email("omar@example.c"));
        assert!(!is_valid_email("omar@@example.com"));
        assert!(!is_valid_email("omar @example.com"));
        assert!(!is_valid_email("omar@example..com"));
        assert!(!is_valid_email("omar@example.123"));
    }

    #[test]
    fn overlong_email_rejected() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn char_len_counts_arabic_letters() {
        assert_eq!(char_len("عمر"), 3);
        assert_eq!("عمر".len(), 6);
    }
}
