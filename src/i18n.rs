//! Locales, locale routing and translation lookup.
//!
//! The site ships in two locales: English at the root (`/`) and Arabic under
//! `/ar`. Every generated page exists in both, so switching language is a
//! pure path rewrite ([`localized_path`]).
//!
//! ## Dictionaries
//!
//! Translated UI strings live in `i18n/<code>.toml` in the content root.
//! Nested tables flatten to dotted keys:
//!
//! ```toml
//! [nav]
//! home = "Home"          # → "nav.home"
//!
//! [contact]
//! thanks = "Thanks {name}, we will call you shortly."
//! ```
//!
//! Lookups never fail: a key missing from the requested locale falls back to
//! English, and a key missing from English renders as the key itself so a
//! gap is visible on the page instead of an empty string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("translation value for '{0}' must be a string")]
    NonString(String),
    #[error("missing English dictionary: {0}")]
    MissingDefault(String),
}

/// A site locale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// All locales in generation order. English first: it is the fallback.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Parse a locale code, tolerant of case and region tags (`ar-EG`, `en_US`).
    pub fn from_code(code: &str) -> Option<Self> {
        let lowered = code.trim().to_ascii_lowercase();
        match lowered.split(['-', '_']).next().unwrap_or("") {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    /// Text direction for the `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Locale::En => "ltr",
            Locale::Ar => "rtl",
        }
    }

    /// URL prefix for pages in this locale (no trailing slash).
    pub fn prefix(self) -> &'static str {
        match self {
            Locale::En => "",
            Locale::Ar => "/ar",
        }
    }

    /// Name of the locale in its own language, for the language switch.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "العربية",
        }
    }

    /// The locale a visitor switches to from this one.
    pub fn other(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }

    /// Locale selected by a URL path prefix.
    pub fn from_path(path: &str) -> Self {
        if path == "/ar" || path.starts_with("/ar/") {
            Locale::Ar
        } else {
            Locale::En
        }
    }
}

/// Remove any locale prefix from a site path. Always returns a path starting with `/`.
fn strip_locale_prefix(path: &str) -> &str {
    if path == "/ar" {
        return "/";
    }
    match path.strip_prefix("/ar/") {
        // Keep the slash that separated the prefix.
        Some(_) => &path[3..],
        None if path.is_empty() => "/",
        None => path,
    }
}

/// Rewrite a site path into the same page in `locale`.
///
/// ```text
/// /services/      → /ar/services/   (Ar)
/// /ar/services/   → /services/      (En)
/// /               → /ar/            (Ar)
/// /ar             → /               (En)
/// ```
pub fn localized_path(path: &str, locale: Locale) -> String {
    let base = strip_locale_prefix(path);
    match locale {
        Locale::En => base.to_string(),
        Locale::Ar if base == "/" => "/ar/".to_string(),
        Locale::Ar => format!("/ar{base}"),
    }
}

/// A string from a data table with an optional Arabic translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl LocalizedText {
    pub fn new(en: &str) -> Self {
        Self {
            en: en.to_string(),
            ar: None,
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => self
                .ar
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(self.en.as_str()),
            Locale::En => &self.en,
        }
    }
}

/// Flattened translation dictionaries for every locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Translations {
    pub en: BTreeMap<String, String>,
    #[serde(default)]
    pub ar: BTreeMap<String, String>,
}

impl Translations {
    /// Load `i18n/en.toml` (required) and `i18n/ar.toml` (optional) from `root`.
    pub fn load(root: &Path) -> Result<Self, I18nError> {
        let dir = root.join("i18n");
        let en_path = dir.join("en.toml");
        if !en_path.exists() {
            return Err(I18nError::MissingDefault(en_path.display().to_string()));
        }
        let en = load_dictionary(&en_path)?;
        let ar_path = dir.join("ar.toml");
        let ar = if ar_path.exists() {
            load_dictionary(&ar_path)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { en, ar })
    }

    fn dictionary(&self, locale: Locale) -> &BTreeMap<String, String> {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }

    /// Look up `key` in `locale`, falling back to English, then to the key.
    pub fn get<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.dictionary(locale)
            .get(key)
            .or_else(|| self.en.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Look up `key` and substitute `{name}` placeholders from `args`.
    ///
    /// Placeholders without a matching argument are left in place.
    pub fn format(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.get(locale, key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// Keys present in English but missing from `locale`.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let dict = self.dictionary(locale);
        self.en
            .keys()
            .filter(|k| !dict.contains_key(*k))
            .map(String::as_str)
            .collect()
    }
}

fn load_dictionary(path: &Path) -> Result<BTreeMap<String, String>, I18nError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: display.clone(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content).map_err(|source| I18nError::Toml {
        path: display,
        source,
    })?;
    let mut out = BTreeMap::new();
    flatten_into(&value, "", &mut out)?;
    Ok(out)
}

fn flatten_into(
    value: &toml::Value,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), I18nError> {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &full, out)?;
            }
            Ok(())
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
            Ok(())
        }
        _ => Err(I18nError::NonString(prefix.to_string())),
    }
}
