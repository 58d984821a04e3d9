//! Lead form definitions and validation.
//!
//! Three forms post to the server:
//!
//! | Kind | Endpoint | Used by |
//! |------|----------|---------|
//! | [`FormKind::Contact`] | `/api/contact` | simple contact form |
//! | [`FormKind::Business`] | `/api/business-contact` | fleet / dealership enquiries |
//! | [`FormKind::Lead`] | `/api/leads/b2c` | multi-step quote wizard |
//!
//! Each kind declares its fields ([`FieldSpec`]); [`validate`] checks a raw
//! field map against them and reports every failing field at once, so the
//! page can mark all problems in one round trip.

pub mod routing;
pub mod spam;
pub mod validate;

use crate::config::FormsConfig;
use crate::i18n::Locale;
use crate::types::Country;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validate::{char_len, is_valid_email, is_valid_phone, normalize_phone};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const TEXT_MAX: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    Business,
    Lead,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Business, FormKind::Lead];

    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::Contact => "/api/contact",
            FormKind::Business => "/api/business-contact",
            FormKind::Lead => "/api/leads/b2c",
        }
    }

    /// Human label used in email subjects.
    pub fn label(self) -> &'static str {
        match self {
            FormKind::Contact => "Contact request",
            FormKind::Business => "Business enquiry",
            FormKind::Lead => "Quote request",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Contact => CONTACT_FIELDS,
            FormKind::Business => BUSINESS_FIELDS,
            FormKind::Lead => LEAD_FIELDS,
        }
    }

    /// Locale-neutral route of the page that carries this form.
    pub fn page_route(self) -> &'static str {
        match self {
            FormKind::Contact | FormKind::Lead => "/contact/",
            FormKind::Business => "/business/",
        }
    }

    /// One of this kind's fields, by name.
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormKind::Contact => "contact",
            FormKind::Business => "business",
            FormKind::Lead => "lead",
        })
    }
}

/// How a field's value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Name,
    Email,
    Phone,
    /// Free text bounded by `forms.max_message_len`.
    Message,
    /// Short free text (selectors, company, car model).
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// English label for the notification email.
    pub label: &'static str,
    pub rule: Rule,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, rule: Rule, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        rule,
        required,
    }
}

const CONTACT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", Rule::Name, true),
    field("email", "Email", Rule::Email, true),
    field("phone", "Phone", Rule::Phone, true),
    field("service", "Service", Rule::Text, false),
    field("branch", "Branch", Rule::Text, false),
    field("message", "Message", Rule::Message, true),
];

const BUSINESS_FIELDS: &[FieldSpec] = &[
    field("company", "Company", Rule::Text, true),
    field("name", "Contact person", Rule::Name, true),
    field("email", "Email", Rule::Email, true),
    field("phone", "Phone", Rule::Phone, true),
    field("fleet_size", "Fleet size", Rule::Text, false),
    field("message", "Message", Rule::Message, false),
];

const LEAD_FIELDS: &[FieldSpec] = &[
    field("name", "Name", Rule::Name, true),
    field("phone", "Phone", Rule::Phone, true),
    field("email", "Email", Rule::Email, false),
    field("car_brand", "Car brand", Rule::Text, true),
    field("car_model", "Car model", Rule::Text, false),
    field("service", "Service", Rule::Text, true),
    field("branch", "Preferred branch", Rule::Text, false),
    field("message", "Notes", Rule::Message, false),
];

/// Why a field was rejected. Serialized as the code the page maps to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Required,
    TooShort,
    TooLong,
    InvalidEmail,
    InvalidPhone,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidPhone => "invalid_phone",
        }
    }

    /// Translation key for the visitor-facing message.
    pub fn message_key(self) -> String {
        format!("form.error.{}", self.as_str())
    }
}

/// Every failing field with its error, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(pub BTreeMap<&'static str, ErrorCode>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<ErrorCode> {
        self.0.get(field).copied()
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: FormKind,
    pub locale: Locale,
    /// Trimmed values of the filled-in declared fields, in declaration order.
    /// The phone value is normalized.
    pub fields: Vec<(&'static FieldSpec, String)>,
    /// Country inferred from the phone number.
    pub country: Option<Country>,
}

impl Submission {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, v)| v.as_str())
    }

    /// Submitter name (required on every form).
    pub fn name(&self) -> &str {
        self.value("name").unwrap_or_default()
    }

    pub fn email(&self) -> Option<&str> {
        self.value("email")
    }

    pub fn phone(&self) -> &str {
        self.value("phone").unwrap_or_default()
    }
}

/// The `locale` field of a raw submission, defaulting to English.
pub fn submission_locale(raw: &BTreeMap<String, String>) -> Locale {
    raw.get("locale")
        .and_then(|l| Locale::from_code(l))
        .unwrap_or_default()
}

/// Validate a raw field map for `kind`.
///
/// Undeclared fields (honeypot, `elapsed_ms`, anything extra) are ignored.
pub fn validate(
    kind: FormKind,
    raw: &BTreeMap<String, String>,
    config: &FormsConfig,
) -> Result<Submission, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut fields = Vec::new();

    for spec in kind.fields() {
        let value = raw.get(spec.name).map(|v| v.trim()).unwrap_or("");
        if value.is_empty() {
            if spec.required {
                errors.0.insert(spec.name, ErrorCode::Required);
            }
            continue;
        }
        match check(spec.rule, value, config) {
            Ok(clean) => fields.push((spec, clean)),
            Err(code) => {
                errors.0.insert(spec.name, code);
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let country = fields
        .iter()
        .find(|(spec, _)| spec.rule == Rule::Phone)
        .and_then(|(_, phone)| routing::country_of(phone));

    Ok(Submission {
        kind,
        locale: submission_locale(raw),
        fields,
        country,
    })
}

fn check(rule: Rule, value: &str, config: &FormsConfig) -> Result<String, ErrorCode> {
    match rule {
        Rule::Name => {
            let len = char_len(value);
            if len < NAME_MIN {
                Err(ErrorCode::TooShort)
            } else if len > NAME_MAX {
                Err(ErrorCode::TooLong)
            } else {
                Ok(value.to_string())
            }
        }
        Rule::Email => {
            if is_valid_email(value) {
                Ok(value.to_string())
            } else {
                Err(ErrorCode::InvalidEmail)
            }
        }
        Rule::Phone => {
            let normalized = normalize_phone(value);
            if is_valid_phone(&normalized) {
                Ok(normalized)
            } else {
                Err(ErrorCode::InvalidPhone)
            }
        }
        Rule::Message if char_len(value) > config.max_message_len => Err(ErrorCode::TooLong),
        Rule::Text if char_len(value) > TEXT_MAX => Err(ErrorCode::TooLong),
        Rule::Message | Rule::Text => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_contact() -> BTreeMap<String, String> {
        raw(&[
            ("name", "  Omar Hassan "),
            ("email", "omar@example.com"),
            ("phone", "+20 10 1234 5678"),
            ("message", "I'd like a quote for full front PPF."),
            ("locale", "ar"),
            ("website", ""),
            ("elapsed_ms", "12000"),
        ])
    }

    #[test]
    fn valid_contact_submission() {
        let sub = validate(FormKind::Contact, &valid_contact(), &FormsConfig::default()).unwrap();
        assert_eq!(sub.name(), "Omar Hassan");
        assert_eq!(sub.phone(), "+201012345678");
        assert_eq!(sub.country, Some(Country::Egypt));
        assert_eq!(sub.locale, Locale::Ar);
        assert_eq!(sub.value("website"), None);
    }

    #[test]
    fn fields_kept_in_declaration_order() {
        let mut fields = valid_contact();
        fields.insert("branch".into(), "new-cairo".into());
        let sub = validate(FormKind::Contact, &fields, &FormsConfig::default()).unwrap();
        let names: Vec<&str> = sub.fields.iter().map(|(s, _)| s.name).collect();
        assert_eq!(names, vec!["name", "email", "phone", "branch", "message"]);
    }

    #[test]
    fn all_errors_reported_together() {
        let fields = raw(&[("name", "O"), ("email", "omar@"), ("phone", "12")]);
        let errors = validate(FormKind::Contact, &fields, &FormsConfig::default()).unwrap_err();
        assert_eq!(errors.get("name"), Some(ErrorCode::TooShort));
        assert_eq!(errors.get("email"), Some(ErrorCode::InvalidEmail));
        assert_eq!(errors.get("phone"), Some(ErrorCode::InvalidPhone));
        assert_eq!(errors.get("message"), Some(ErrorCode::Required));
    }

    #[test]
    fn whitespace_only_is_missing() {
        let mut fields = valid_contact();
        fields.insert("message".into(), "   \n ".into());
        let errors = validate(FormKind::Contact, &fields, &FormsConfig::default()).unwrap_err();
        assert_eq!(errors.get("message"), Some(ErrorCode::Required));
    }

    #[test]
    fn message_length_limit_from_config() {
        let config = FormsConfig {
            max_message_len: 10,
            ..FormsConfig::default()
        };
        let errors = validate(FormKind::Contact, &valid_contact(), &config).unwrap_err();
        assert_eq!(errors.get("message"), Some(ErrorCode::TooLong));
    }

    #[test]
    fn optional_fields_validated_when_present() {
        let fields = raw(&[
            ("name", "Layla"),
            ("phone", "0501234567"),
            ("car_brand", "BMW"),
            ("service", "full-body"),
            ("email", "not-an-email"),
        ]);
        let errors = validate(FormKind::Lead, &fields, &FormsConfig::default()).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.get("email"), Some(ErrorCode::InvalidEmail));
    }

    #[test]
    fn lead_without_email_is_valid() {
        let fields = raw(&[
            ("name", "Layla"),
            ("phone", "0501234567"),
            ("car_brand", "BMW"),
            ("service", "full-body"),
        ]);
        let sub = validate(FormKind::Lead, &fields, &FormsConfig::default()).unwrap();
        assert_eq!(sub.email(), None);
        assert_eq!(sub.country, Some(Country::Uae));
        assert_eq!(sub.locale, Locale::En);
    }

    #[test]
    fn business_requires_company() {
        let fields = raw(&[
            ("name", "Karim"),
            ("email", "karim@fleet.example"),
            ("phone", "+971 4 234 5678"),
        ]);
        let errors = validate(FormKind::Business, &fields, &FormsConfig::default()).unwrap_err();
        assert_eq!(errors.0.keys().copied().collect::<Vec<_>>(), vec!["company"]);
    }

    #[test]
    fn arabic_name_length_in_characters() {
        let mut fields = valid_contact();
        fields.insert("name".into(), "عم".into());
        assert!(validate(FormKind::Contact, &fields, &FormsConfig::default()).is_ok());
    }

    #[test]
    fn unknown_country_phone_is_accepted() {
        let mut fields = valid_contact();
        fields.insert("phone".into(), "+966 50 123 4567".into());
        let sub = validate(FormKind::Contact, &fields, &FormsConfig::default()).unwrap();
        assert_eq!(sub.country, None);
    }

    #[test]
    fn endpoints_are_distinct() {
        let endpoints: std::collections::HashSet<_> =
            FormKind::ALL.iter().map(|k| k.endpoint()).collect();
        assert_eq!(endpoints.len(), 3);
    }

    #[test]
    fn error_message_keys() {
        assert_eq!(ErrorCode::InvalidPhone.message_key(), "form.error.invalid_phone");
    }
}
