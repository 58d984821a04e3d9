//! Shared types serialized between the scan and generate stages.
//!
//! The data tables (`data/*.toml` in the content root) deserialize straight
//! into these types. Strings a visitor reads are [`LocalizedText`], so a row
//! with no Arabic translation still renders in English on `/ar` pages.

use crate::i18n::{Locale, LocalizedText};
use serde::{Deserialize, Serialize};

/// Country a branch, or a lead's phone number, belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Egypt,
    Uae,
}

impl Country {
    pub fn label(self) -> &'static str {
        match self {
            Country::Egypt => "Egypt",
            Country::Uae => "UAE",
        }
    }
}

/// A physical location shown in the branch locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch {
    /// Stable identifier, also the value submitted by the forms' branch selector.
    pub id: String,
    pub name: LocalizedText,
    pub address: LocalizedText,
    pub city: LocalizedText,
    pub country: Country,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<LocalizedText>,
    pub lat: f64,
    pub lng: f64,
}

impl Branch {
    /// `tel:` link target with separators removed.
    pub fn tel_href(&self) -> String {
        format!("tel:{}", dial_digits(&self.phone))
    }

    /// `wa.me` link for the branch WhatsApp number, if any.
    pub fn whatsapp_href(&self) -> Option<String> {
        self.whatsapp
            .as_deref()
            .map(|n| format!("https://wa.me/{}", dial_digits(n).trim_start_matches('+')))
    }
}

fn dial_digits(number: &str) -> String {
    number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// A customer quote for the testimonial carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub author: String,
    /// Vehicle the work was done on, e.g. "Porsche 911".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<String>,
    pub quote: LocalizedText,
    /// Star rating, 1 to 5.
    pub rating: u8,
}

/// A serviced car brand, shown in the logo strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Brand {
    pub name: String,
    /// Path of the logo under the assets directory.
    pub logo: String,
}

/// A service offered, shown on the home and services pages and in form selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Feature comparison table (e.g. PPF vs ceramic coating vs wax).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Comparison {
    #[serde(default)]
    pub columns: Vec<LocalizedText>,
    #[serde(default, rename = "row")]
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonRow {
    pub feature: LocalizedText,
    /// One value per column, in column order.
    pub values: Vec<LocalizedText>,
}

/// A markdown page in one locale.
///
/// Numbered files (`NNN-slug.<locale>.md`) appear in navigation, sorted by
/// number. If the file content is just a URL, the page becomes an external
/// link in nav.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub locale: Locale,
    /// Title from first `# heading` in markdown, or link_title as fallback
    pub title: String,
    /// Display label in nav (filename with number stripped and dashes → spaces)
    pub link_title: String,
    /// URL slug (filename stem with number prefix and locale stripped)
    pub slug: String,
    /// Raw markdown content (or URL for link pages)
    pub body: String,
    pub in_nav: bool,
    pub sort_key: u32,
    pub is_link: bool,
    /// Source file relative to the content root.
    pub source: String,
}

/// An image in the gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Number prefix; `None` for unnumbered images, which sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Output path relative to the site root (`gallery/001-porsche.jpg`).
    pub path: String,
    pub caption: LocalizedText,
}

/// Navigation link in the header, per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    /// Site-relative href (`/ar/gallery/`) or an absolute URL for link pages.
    pub href: String,
    #[serde(default)]
    pub external: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> Branch {
        Branch {
            id: "new-cairo".into(),
            name: LocalizedText::new("New Cairo"),
            address: LocalizedText::new("90th Street"),
            city: LocalizedText::new("Cairo"),
            country: Country::Egypt,
            phone: "+20 10 1234 5678".into(),
            whatsapp: Some("+20 (10) 1234-5678".into()),
            hours: None,
            lat: 30.02,
            lng: 31.47,
        }
    }

    #[test]
    fn tel_href_strips_separators() {
        assert_eq!(branch().tel_href(), "tel:+201012345678");
    }

    #[test]
    fn whatsapp_href_drops_plus() {
        assert_eq!(
            branch().whatsapp_href().as_deref(),
            Some("https://wa.me/201012345678")
        );
    }

    #[test]
    fn comparison_parses_rows() {
        let toml = r#"
columns = [{ en = "PPF", ar = "فيلم الحماية" }, { en = "Wax" }]

[[row]]
feature = { en = "Self-healing" }
values = [{ en = "Yes" }, { en = "No" }]
"#;
        let cmp: Comparison = toml::from_str(toml).unwrap();
        assert_eq!(cmp.columns.len(), 2);
        assert_eq!(cmp.rows[0].values[1].en, "No");
        assert_eq!(cmp.columns[0].get(Locale::Ar), "فيلم الحماية");
    }

    #[test]
    fn country_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct W {
            c: Country,
        }
        let w: W = toml::from_str("c = \"uae\"").unwrap();
        assert_eq!(w.c, Country::Uae);
    }
}
