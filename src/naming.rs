//! Centralized filename parsing for the `NNN-name[.locale]` convention.
//!
//! Pages, gallery images and their caption sidecars all follow the same
//! naming pattern: an optional numeric prefix (`NNN-`), a name, and an
//! optional locale suffix before the extension. This module extracts all
//! three parts consistently.
//!
//! ## Examples
//!
//! - `020-about.ar` → number 20, name `about`, locale Arabic
//! - `010-Ceramic-Coating` → number 10, title "Ceramic Coating", no locale
//! - `draft-offer` → unnumbered (hidden from nav), title "draft offer"

use crate::i18n::Locale;

/// Result of parsing a numbered entry name like `020-Full-Body-Wrap`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Full-Body-Wrap`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-Full-Body-Wrap"` → number=Some(20), name="Full-Body-Wrap", display_title="Full Body Wrap"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"wip-offer"` → number=None, name="wip-offer", display_title="wip offer"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, raw)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: raw.to_string(),
            display_title: raw.replace('-', " "),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Split a file stem into its base name and an optional locale suffix.
///
/// Only recognized locale codes are treated as suffixes, so dotted names
/// such as `v2.1-release` survive untouched.
///
/// - `"020-about.ar"` → (`"020-about"`, Some(Ar))
/// - `"020-about.en"` → (`"020-about"`, Some(En))
/// - `"020-about"` → (`"020-about"`, None)
pub fn split_locale_suffix(stem: &str) -> (&str, Option<Locale>) {
    if let Some((base, suffix)) = stem.rsplit_once('.')
        && let Some(locale) = Locale::from_code(suffix)
    {
        return (base, Some(locale));
    }
    (stem, None)
}
