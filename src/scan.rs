//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory and produces a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── i18n/
//! │   ├── en.toml                  # UI strings (required)
//! │   └── ar.toml                  # Arabic UI strings (missing keys fall back)
//! ├── data/
//! │   ├── branches.toml            # [[branch]] rows
//! │   ├── testimonials.toml        # [[testimonial]] rows
//! │   ├── brands.toml              # [[brand]] rows
//! │   ├── services.toml            # [[service]] rows
//! │   └── comparison.toml          # columns + [[row]]
//! ├── pages/
//! │   ├── 040-about.en.md          # Page (numbered = shown in nav)
//! │   ├── 040-about.ar.md          # Same page, Arabic
//! │   └── warranty.md              # Unnumbered, no suffix = English, hidden from nav
//! ├── gallery/
//! │   ├── 001-porsche-911.jpg      # Ordered by number prefix
//! │   ├── 001-porsche-911.txt      # English caption (optional)
//! │   └── 001-porsche-911.ar.txt   # Arabic caption (optional)
//! └── assets/                      # Copied verbatim to the output root
//! ```
//!
//! Every data file is optional; a missing file is an empty table.
//!
//! ## Validation
//!
//! Hard errors stop the build: duplicate gallery numbers, duplicate branch
//! ids, coordinates out of range, ratings outside 1–5, comparison rows whose
//! value count differs from the column count, and pages that would collide
//! with a built-in route. Softer problems (untranslated keys, single-locale
//! pages) are reported by [`check_content`] without failing.

use crate::config::{self, SiteConfig};
use crate::i18n::{self, Locale, LocalizedText, Translations};
use crate::naming::{parse_entry_name, split_locale_suffix};
use crate::types::{Branch, Brand, Comparison, GalleryImage, Page, Service, Testimonial};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Translation error: {0}")]
    I18n(#[from] i18n::I18nError),
    #[error("Invalid data file {path}: {source}")]
    Data {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate gallery number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Duplicate branch id '{0}'")]
    DuplicateBranch(String),
    #[error("Branch '{0}' has coordinates out of range")]
    InvalidCoordinates(String),
    #[error("Testimonial by '{0}' must have a rating between 1 and 5")]
    InvalidRating(String),
    #[error("Comparison row '{feature}' has {found} values, expected {expected}")]
    ComparisonShape {
        feature: String,
        found: usize,
        expected: usize,
    },
    #[error("Duplicate page '{slug}' for locale {locale}")]
    DuplicatePage { slug: String, locale: &'static str },
    #[error("Page slug '{0}' collides with a built-in route")]
    ReservedSlug(String),
    #[error("Page {0} has no usable slug (name it NNN-slug.md)")]
    InvalidSlug(PathBuf),
}

/// Built-in routes a markdown page may not shadow.
pub const RESERVED_SLUGS: &[&str] = &[
    "ar", "api", "services", "gallery", "branches", "contact", "business", "thanks",
];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

/// Everything the generate stage needs, serialized as `manifest.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub translations: Translations,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub comparison: Comparison,
}

impl Manifest {
    /// Pages for one locale, in navigation order.
    pub fn pages_for(&self, locale: Locale) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |p| p.locale == locale)
    }
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct BranchesFile {
    branch: Vec<Branch>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct TestimonialsFile {
    testimonial: Vec<Testimonial>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct BrandsFile {
    brand: Vec<Brand>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ServicesFile {
    service: Vec<Service>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let translations = Translations::load(root)?;

    let branches = load_table::<BranchesFile>(root, "branches")?.branch;
    validate_branches(&branches)?;
    let testimonials = load_table::<TestimonialsFile>(root, "testimonials")?.testimonial;
    validate_testimonials(&testimonials)?;
    let brands = load_table::<BrandsFile>(root, "brands")?.brand;
    let services = load_table::<ServicesFile>(root, "services")?.service;
    let comparison = load_table::<Comparison>(root, "comparison")?;
    validate_comparison(&comparison)?;

    let pages = parse_pages(root)?;
    let gallery = scan_gallery(root)?;

    Ok(Manifest {
        config,
        translations,
        pages,
        gallery,
        branches,
        testimonials,
        brands,
        services,
        comparison,
    })
}

/// Load `data/<name>.toml`, or the empty table if it doesn't exist.
fn load_table<T: DeserializeOwned + Default>(root: &Path, name: &str) -> Result<T, ScanError> {
    let path = root.join("data").join(format!("{name}.toml"));
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|source| ScanError::Data { path, source })
}

fn validate_branches(branches: &[Branch]) -> Result<(), ScanError> {
    let mut seen = HashSet::new();
    for branch in branches {
        if !seen.insert(branch.id.as_str()) {
            return Err(ScanError::DuplicateBranch(branch.id.clone()));
        }
        if !(-90.0..=90.0).contains(&branch.lat) || !(-180.0..=180.0).contains(&branch.lng) {
            return Err(ScanError::InvalidCoordinates(branch.id.clone()));
        }
    }
    Ok(())
}

fn validate_testimonials(testimonials: &[Testimonial]) -> Result<(), ScanError> {
    match testimonials.iter().find(|t| !(1..=5).contains(&t.rating)) {
        Some(t) => Err(ScanError::InvalidRating(t.author.clone())),
        None => Ok(()),
    }
}

fn validate_comparison(comparison: &Comparison) -> Result<(), ScanError> {
    let expected = comparison.columns.len();
    for row in &comparison.rows {
        if row.values.len() != expected {
            return Err(ScanError::ComparisonShape {
                feature: row.feature.en.clone(),
                found: row.values.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Parse every markdown file in `pages/` into a per-locale [`Page`].
///
/// A file without a locale suffix is English. If a file's only content is a
/// URL, it becomes an external link in the nav.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let dir = root.join("pages");
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut md_files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    md_files.sort();

    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let (base, locale) = split_locale_suffix(&stem);
        let locale = locale.unwrap_or_default();
        let parsed = parse_entry_name(base);
        let slug = parsed.name.clone();

        if !is_valid_slug(&slug) {
            return Err(ScanError::InvalidSlug(md_path.clone()));
        }
        if RESERVED_SLUGS.contains(&slug.as_str()) {
            return Err(ScanError::ReservedSlug(slug));
        }
        if !seen.insert((slug.clone(), locale)) {
            return Err(ScanError::DuplicatePage {
                slug,
                locale: locale.code(),
            });
        }

        let content = fs::read_to_string(md_path)?;
        let trimmed = content.trim();
        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let link_title = parsed.display_title.clone();
        let title = if is_link {
            link_title.clone()
        } else {
            content
                .lines()
                .find(|line| line.starts_with("# "))
                .map(|line| line.trim_start_matches("# ").trim().to_string())
                .unwrap_or_else(|| link_title.clone())
        };

        pages.push(Page {
            locale,
            title,
            link_title,
            slug,
            body: if is_link { trimmed.to_string() } else { content },
            in_nav: parsed.number.is_some(),
            sort_key: parsed.number.unwrap_or(u32::MAX),
            is_link,
            source: format!("pages/{}", md_path.file_name().unwrap_or_default().to_string_lossy()),
        });
    }

    pages.sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    Ok(pages)
}

/// A slug becomes one path segment of the output, so it must be non-empty
/// and free of separators and dots.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['.', '/', '\\'])
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Collect gallery images ordered by number prefix.
///
/// Unnumbered images sort after numbered ones, in filename order.
fn scan_gallery(root: &Path) -> Result<Vec<GalleryImage>, ScanError> {
    let dir = root.join("gallery");
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .collect();
    files.sort();

    let mut numbered: BTreeMap<u32, PathBuf> = BTreeMap::new();
    let mut unnumbered: Vec<PathBuf> = Vec::new();
    for file in files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match parse_entry_name(&stem).number {
            Some(num) => {
                if numbered.contains_key(&num) {
                    return Err(ScanError::DuplicateNumber(num, dir.clone()));
                }
                numbered.insert(num, file);
            }
            None => unnumbered.push(file),
        }
    }

    let ordered = numbered
        .into_iter()
        .map(|(number, file)| (Some(number), file))
        .chain(unnumbered.into_iter().map(|file| (None, file)));

    let mut images = Vec::new();
    for (number, file) in ordered {
        let filename = file
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let caption = LocalizedText {
            en: read_sidecar(&dir.join(format!("{stem}.txt")))?
                .unwrap_or_else(|| parse_entry_name(&stem).display_title),
            ar: read_sidecar(&dir.join(format!("{stem}.ar.txt")))?,
        };
        images.push(GalleryImage {
            number,
            path: format!("gallery/{filename}"),
            caption,
        });
    }
    Ok(images)
}

fn read_sidecar(path: &Path) -> Result<Option<String>, ScanError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?.trim().to_string();
    Ok(if content.is_empty() { None } else { Some(content) })
}

/// A non-fatal content problem reported by `check`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWarning {
    /// Dictionary keys with no translation in a locale.
    MissingTranslations { locale: Locale, keys: Vec<String> },
    /// A page that exists in only one locale.
    SingleLocalePage { slug: String, locale: Locale },
    /// A branch with no WhatsApp number.
    BranchWithoutWhatsapp(String),
    /// A table row whose Arabic text is missing.
    UntranslatedRow { table: &'static str, row: String },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::MissingTranslations { locale, keys } => write!(
                f,
                "{} translation keys missing in {}: {}",
                keys.len(),
                locale.code(),
                keys.join(", ")
            ),
            ContentWarning::SingleLocalePage { slug, locale } => {
                write!(f, "page '{slug}' only exists in {}", locale.code())
            }
            ContentWarning::BranchWithoutWhatsapp(id) => {
                write!(f, "branch '{id}' has no WhatsApp number")
            }
            ContentWarning::UntranslatedRow { table, row } => {
                write!(f, "{table}: '{row}' has no Arabic text")
            }
        }
    }
}

/// Collect non-fatal content warnings.
pub fn check_content(manifest: &Manifest) -> Vec<ContentWarning> {
    let mut warnings = Vec::new();

    for locale in Locale::ALL.into_iter().filter(|l| *l != Locale::En) {
        let keys = manifest.translations.missing_keys(locale);
        if !keys.is_empty() {
            warnings.push(ContentWarning::MissingTranslations {
                locale,
                keys: keys.into_iter().map(str::to_string).collect(),
            });
        }
    }

    let mut by_slug: BTreeMap<&str, Vec<Locale>> = BTreeMap::new();
    for page in &manifest.pages {
        by_slug.entry(&page.slug).or_default().push(page.locale);
    }
    for (slug, locales) in by_slug {
        if let [only] = locales.as_slice() {
            warnings.push(ContentWarning::SingleLocalePage {
                slug: slug.to_string(),
                locale: *only,
            });
        }
    }

    for branch in &manifest.branches {
        if branch.whatsapp.is_none() {
            warnings.push(ContentWarning::BranchWithoutWhatsapp(branch.id.clone()));
        }
        if branch.name.ar.is_none() || branch.address.ar.is_none() {
            warnings.push(ContentWarning::UntranslatedRow {
                table: "branches",
                row: branch.id.clone(),
            });
        }
    }
    for service in &manifest.services {
        if service.title.ar.is_none() || service.summary.ar.is_none() {
            warnings.push(ContentWarning::UntranslatedRow {
                table: "services",
                row: service.id.clone(),
            });
        }
    }
    for testimonial in &manifest.testimonials {
        if testimonial.quote.ar.is_none() {
            warnings.push(ContentWarning::UntranslatedRow {
                table: "testimonials",
                row: testimonial.author.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn scan_fixtures_loads_tables() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site_name, "Shield Auto Care");
        assert_eq!(branch_ids(&manifest), vec!["new-cairo", "sheikh-zayed", "dubai-al-quoz"]);
        assert_eq!(manifest.testimonials.len(), 3);
        assert_eq!(manifest.brands.len(), 4);
        assert_eq!(manifest.services.len(), 3);
        assert_eq!(manifest.comparison.columns.len(), 3);
    }

    #[test]
    fn scan_fixtures_loads_translations() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.translations.get(Locale::En, "nav.home"), "Home");
        assert_eq!(manifest.translations.get(Locale::Ar, "nav.home"), "الرئيسية");
    }

    #[test]
    fn pages_split_by_locale() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let about_en = find_page(&manifest, "about", Locale::En);
        let about_ar = find_page(&manifest, "about", Locale::Ar);
        assert_eq!(about_en.title, "About Us");
        assert_eq!(about_ar.title, "من نحن");
        assert!(about_en.in_nav);
    }

    #[test]
    fn unsuffixed_page_is_english_and_hidden() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let warranty = find_page(&manifest, "warranty", Locale::En);
        assert!(!warranty.in_nav);
        assert_eq!(warranty.sort_key, u32::MAX);
    }

    #[test]
    fn link_page_detected() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let insta = find_page(&manifest, "instagram", Locale::En);
        assert!(insta.is_link);
        assert_eq!(insta.body, "https://instagram.com/shieldautocare");
    }

    #[test]
    fn pages_sorted_by_number() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let slugs: Vec<&str> = manifest
            .pages_for(Locale::En)
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["about", "instagram", "warranty"]);
    }

    #[test]
    fn gallery_ordered_with_captions() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let captions: Vec<&str> = manifest.gallery.iter().map(|g| g.caption.en.as_str()).collect();
        assert_eq!(captions, vec!["Porsche 911 in satin PPF", "g63 matte", "showroom"]);
        assert_eq!(manifest.gallery[0].path, "gallery/001-porsche-911.jpg");
        assert_eq!(manifest.gallery[0].caption.get(Locale::Ar), "بورشه 911 بفيلم ساتان");
        assert_eq!(manifest.gallery[1].caption.get(Locale::Ar), "g63 matte");
    }

    #[test]
    fn gallery_duplicate_number_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("gallery/001-other.jpg"), b"x").unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateNumber(1, _))));
    }

    #[test]
    fn large_numbers_do_not_collide_with_unnumbered_images() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("gallery/1000000-rs6.jpg"), b"x").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let paths: Vec<&str> = manifest.gallery.iter().map(|g| g.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "gallery/001-porsche-911.jpg",
                "gallery/002-g63-matte.jpg",
                "gallery/1000000-rs6.jpg",
                "gallery/showroom.jpg",
            ]
        );
        assert_eq!(manifest.gallery[2].number, Some(1_000_000));
        assert_eq!(manifest.gallery[3].number, None);
    }

    #[test]
    fn duplicate_branch_is_error() {
        let tmp = setup_fixtures();
        let path = tmp.path().join("data/branches.toml");
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str(
            r#"
[[branch]]
id = "new-cairo"
name = { en = "Again" }
address = { en = "x" }
city = { en = "Cairo" }
country = "egypt"
phone = "+20 100 000 0000"
lat = 30.0
lng = 31.0
"#,
        );
        fs::write(&path, content).unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::DuplicateBranch(id)) if id == "new-cairo"));
    }

    #[test]
    fn out_of_range_coordinates_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/branches.toml"),
            r#"
[[branch]]
id = "nowhere"
name = { en = "Nowhere" }
address = { en = "x" }
city = { en = "x" }
country = "uae"
phone = "+971 4 000 0000"
lat = 95.0
lng = 55.0
"#,
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::InvalidCoordinates(_))));
    }

    #[test]
    fn bad_rating_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/testimonials.toml"),
            "[[testimonial]]\nauthor = \"Sam\"\nquote = { en = \"Great\" }\nrating = 6\n",
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::InvalidRating(a)) if a == "Sam"));
    }

    #[test]
    fn comparison_shape_mismatch_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/comparison.toml"),
            "columns = [{ en = \"PPF\" }, { en = \"Wax\" }]\n[[row]]\nfeature = { en = \"Gloss\" }\nvalues = [{ en = \"Yes\" }]\n",
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::ComparisonShape { found: 1, expected: 2, .. })
        ));
    }

    #[test]
    fn unknown_data_key_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/brands.toml"),
            "[[brand]]\nname = \"BMW\"\nlogo = \"brands/bmw.svg\"\nurl = \"x\"\n",
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Data { .. })));
    }

    #[test]
    fn reserved_slug_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("pages/050-gallery.md"), "# Gallery\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::ReservedSlug(s)) if s == "gallery"));
    }

    #[test]
    fn duplicate_page_in_locale_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("pages/about.md"), "# Again\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::DuplicatePage { .. })));
    }

    #[test]
    fn number_only_page_is_rejected() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("pages/050.md"), "# Offers\n\nSpecial offer body\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::InvalidSlug(p)) if p.ends_with("050.md")));
    }

    #[test]
    fn dotted_page_slug_is_rejected() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("pages/050-..ar.md"), "# Up\n").unwrap();
        fs::write(tmp.path().join("pages/v2.1-notes.md"), "# Notes\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::InvalidSlug(_))));
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("about"));
        assert!(is_valid_slug("ppf-warranty_2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("a.b"));
    }

    #[test]
    fn missing_data_files_are_empty() {
        let tmp = setup_fixtures();
        fs::remove_dir_all(tmp.path().join("data")).unwrap();
        fs::remove_dir_all(tmp.path().join("gallery")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.branches.is_empty());
        assert!(manifest.gallery.is_empty());
        assert!(manifest.comparison.rows.is_empty());
    }

    #[test]
    fn check_reports_warnings() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let warnings = check_content(&manifest);
        assert!(warnings.contains(&ContentWarning::SingleLocalePage {
            slug: "warranty".into(),
            locale: Locale::En,
        }));
        assert!(warnings.contains(&ContentWarning::BranchWithoutWhatsapp("sheikh-zayed".into())));
        assert!(warnings.iter().any(|w| matches!(
            w,
            ContentWarning::MissingTranslations { locale: Locale::Ar, keys } if keys.contains(&"footer.tagline".to_string())
        )));
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pages.len(), manifest.pages.len());
        assert_eq!(back.branches[2].id, "dubai-al-quoz");
    }
}
