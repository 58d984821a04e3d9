//! Destination inbox selection from the submitted phone number.

use crate::config::{FallbackInbox, MailConfig};
use crate::forms::FormKind;
use crate::types::Country;

/// Country of a normalized phone number (see [`super::validate::normalize_phone`]).
///
/// International numbers are matched on calling code, with or without the
/// `+`. Local numbers are matched on the mobile formats customers actually
/// type: Egyptian `01[0125]XXXXXXXX` and Emirati `05XXXXXXXX`, each also
/// without the leading zero.
pub fn country_of(normalized: &str) -> Option<Country> {
    if normalized.starts_with("+20") {
        return Some(Country::Egypt);
    }
    if normalized.starts_with("+971") {
        return Some(Country::Uae);
    }
    if normalized.starts_with('+') {
        return None;
    }
    let bytes = normalized.as_bytes();
    match (bytes.len(), bytes) {
        (11, [b'0', b'1', b'0' | b'1' | b'2' | b'5', ..])
        | (10, [b'1', b'0' | b'1' | b'2' | b'5', ..])
        | (12, [b'2', b'0', b'1', b'0' | b'1' | b'2' | b'5', ..]) => Some(Country::Egypt),
        (10, [b'0', b'5', ..])
        | (9, [b'5', b'0' | b'2' | b'4' | b'5' | b'6' | b'8', ..])
        | (11 | 12, [b'9', b'7', b'1', ..]) => Some(Country::Uae),
        _ => None,
    }
}

/// Inbox for a submission of `kind` from a phone in `country`.
pub fn inbox_for<'a>(kind: FormKind, country: Option<Country>, mail: &'a MailConfig) -> &'a str {
    if kind == FormKind::Business
        && let Some(inbox) = &mail.business_inbox
    {
        return inbox;
    }
    let country = country.unwrap_or(match mail.fallback_inbox {
        FallbackInbox::Egypt => Country::Egypt,
        FallbackInbox::Uae => Country::Uae,
    });
    match country {
        Country::Egypt => &mail.inbox_egypt,
        Country::Uae => &mail.inbox_uae,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn international_egypt() {
        assert_eq!(country_of("+201012345678"), Some(Country::Egypt));
    }

    #[test]
    fn international_uae() {
        assert_eq!(country_of("+971501234567"), Some(Country::Uae));
        assert_eq!(country_of("+97142345678"), Some(Country::Uae));
    }

    #[test]
    fn local_egyptian_mobiles() {
        for n in ["01012345678", "01112345678", "01212345678", "01512345678"] {
            assert_eq!(country_of(n), Some(Country::Egypt), "{n}");
        }
        assert_eq!(country_of("01312345678"), None);
    }

    #[test]
    fn local_uae_mobile() {
        assert_eq!(country_of("0501234567"), Some(Country::Uae));
        assert_eq!(country_of("050123456"), None);
    }

    #[test]
    fn calling_code_without_plus() {
        assert_eq!(country_of("971501234567"), Some(Country::Uae));
        assert_eq!(country_of("97142345678"), Some(Country::Uae));
        assert_eq!(country_of("201012345678"), Some(Country::Egypt));
    }

    #[test]
    fn mobiles_without_leading_zero() {
        assert_eq!(country_of("501234567"), Some(Country::Uae));
        assert_eq!(country_of("1012345678"), Some(Country::Egypt));
        assert_eq!(country_of("301234567"), None);
    }

    #[test]
    fn other_countries_unknown() {
        assert_eq!(country_of("+966501234567"), None);
        assert_eq!(country_of("+4915112345678"), None);
    }

    #[test]
    fn routes_by_country() {
        let mail = MailConfig::default();
        assert_eq!(
            inbox_for(FormKind::Contact, Some(Country::Uae), &mail),
            "sales-ae@example.com"
        );
        assert_eq!(
            inbox_for(FormKind::Lead, Some(Country::Egypt), &mail),
            "sales-eg@example.com"
        );
    }

    #[test]
    fn unknown_country_uses_fallback() {
        let mut mail = MailConfig::default();
        assert_eq!(inbox_for(FormKind::Lead, None, &mail), "sales-eg@example.com");
        mail.fallback_inbox = FallbackInbox::Uae;
        assert_eq!(inbox_for(FormKind::Lead, None, &mail), "sales-ae@example.com");
    }

    #[test]
    fn business_inbox_overrides_country() {
        let mut mail = MailConfig::default();
        assert_eq!(
            inbox_for(FormKind::Business, Some(Country::Uae), &mail),
            "sales-ae@example.com"
        );
        mail.business_inbox = Some("fleet@example.com".into());
        assert_eq!(
            inbox_for(FormKind::Business, Some(Country::Uae), &mail),
            "fleet@example.com"
        );
        assert_eq!(
            inbox_for(FormKind::Contact, Some(Country::Uae), &mail),
            "sales-ae@example.com"
        );
    }
}
