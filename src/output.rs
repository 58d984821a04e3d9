//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (page,
//! gallery image, data table) leads with its positional index and title,
//! with filesystem paths shown as indented `Source:` lines. The output reads
//! as a content inventory while still letting users trace data back to files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 About Us [en, ar]
//!     Source: pages/040-about.ar.md
//!     Source: pages/040-about.en.md
//! 002 instagram (link) [en]
//!     Source: pages/060-instagram.md
//!
//! Gallery
//! 001 Porsche 911 in satin PPF
//!     Source: gallery/001-porsche-911.jpg
//!
//! Data
//!     3 branches (Egypt 2, UAE 1)
//!     3 testimonials
//!
//! Translations
//!     en: 96 keys
//!     ar: 95 keys (1 missing)
//! ```
//!
//! ## Generate
//!
//! ```text
//! English
//!     index.html
//!     services/index.html
//! Arabic
//!     ar/index.html
//!
//! Assets
//!     site.3fa9c21b.css
//!     site.91d0e6aa.js
//!
//! Generated 16 pages in 2 locales
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::i18n::Locale;
use crate::scan::{ContentWarning, Manifest};
use crate::types::{Country, Page};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn locale_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Ar => "Arabic",
    }
}

/// Singular or plural noun for a count: `1 brand`, `3 brands`.
fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Group pages by slug, keeping nav order. Each group lists its locale variants.
fn group_pages(pages: &[Page]) -> Vec<(&str, Vec<&Page>)> {
    let mut groups: Vec<(&str, Vec<&Page>)> = Vec::new();
    for page in pages {
        match groups.iter_mut().find(|(slug, _)| *slug == page.slug) {
            Some((_, variants)) => variants.push(page),
            None => groups.push((&page.slug, vec![page])),
        }
    }
    for (_, variants) in &mut groups {
        variants.sort_by_key(|p| p.locale);
    }
    groups
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing discovered content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    // Pages section
    if !manifest.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, (_, variants)) in group_pages(&manifest.pages).iter().enumerate() {
            let first = variants[0];
            let title = variants
                .iter()
                .find(|p| p.locale == Locale::En)
                .map(|p| p.title.as_str())
                .unwrap_or(&first.title);
            let locales: Vec<&str> = variants.iter().map(|p| p.locale.code()).collect();
            let mut header = format!("{} {}", format_index(i + 1), title);
            if first.is_link {
                header.push_str(" (link)");
            } else if !first.in_nav {
                header.push_str(" (hidden)");
            }
            header.push_str(&format!(" [{}]", locales.join(", ")));
            lines.push(header);
            for page in variants {
                lines.push(format!("    Source: {}", page.source));
            }
        }
        lines.push(String::new());
    }

    // Gallery section
    if !manifest.gallery.is_empty() {
        lines.push("Gallery".to_string());
        for (i, image) in manifest.gallery.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), image.caption.en));
            lines.push(format!("    Source: {}", image.path));
            if image.caption.ar.is_none() {
                lines.push("    Arabic caption: (falls back to English)".to_string());
            }
        }
        lines.push(String::new());
    }

    // Data section
    lines.push("Data".to_string());
    let egypt = manifest
        .branches
        .iter()
        .filter(|b| b.country == Country::Egypt)
        .count();
    let uae = manifest.branches.len() - egypt;
    lines.push(format!(
        "    {} ({} {egypt}, {} {uae})",
        count_noun(manifest.branches.len(), "branch", "branches"),
        Country::Egypt.label(),
        Country::Uae.label(),
    ));
    lines.push(format!(
        "    {}",
        count_noun(manifest.testimonials.len(), "testimonial", "testimonials")
    ));
    lines.push(format!(
        "    {}",
        count_noun(manifest.brands.len(), "brand", "brands")
    ));
    lines.push(format!(
        "    {}",
        count_noun(manifest.services.len(), "service", "services")
    ));
    lines.push(format!(
        "    comparison: {} × {}",
        count_noun(manifest.comparison.columns.len(), "column", "columns"),
        count_noun(manifest.comparison.rows.len(), "row", "rows")
    ));

    // Translations section
    lines.push(String::new());
    lines.push("Translations".to_string());
    let t = &manifest.translations;
    lines.push(format!("    en: {} keys", t.en.len()));
    let missing = t.missing_keys(Locale::Ar).len();
    if missing == 0 {
        lines.push(format!("    ar: {} keys", t.ar.len()));
    } else {
        lines.push(format!("    ar: {} keys ({missing} missing)", t.ar.len()));
    }

    // Config section
    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format content warnings found by `check`.
pub fn format_check_output(warnings: &[ContentWarning]) -> Vec<String> {
    if warnings.is_empty() {
        return vec!["Content OK: no warnings".to_string()];
    }
    let mut lines = vec![count_noun(warnings.len(), "warning", "warnings")];
    for warning in warnings {
        lines.push(format!("    {warning}"));
    }
    lines
}

pub fn print_check_output(warnings: &[ContentWarning]) {
    for line in format_check_output(warnings) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: pages written per locale, then assets.
pub fn format_generate_output(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (locale, files) in &report.pages {
        lines.push(locale_heading(*locale).to_string());
        for file in files {
            lines.push(format!("    {file}"));
        }
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("    {}", report.stylesheet));
    lines.push(format!("    {}", report.script));
    if report.assets_copied > 0 {
        lines.push(format!(
            "    {} copied",
            count_noun(report.assets_copied, "file", "files")
        ));
    }
    if report.gallery_copied > 0 {
        lines.push(format!(
            "    {}",
            count_noun(report.gallery_copied, "gallery image", "gallery images")
        ));
    }

    lines.push(String::new());
    let total: usize = report.pages.values().map(Vec::len).sum();
    lines.push(format!(
        "Generated {} in {} ({} in sitemap)",
        count_noun(total, "page", "pages"),
        count_noun(report.pages.len(), "locale", "locales"),
        count_noun(report.routes.len() * report.pages.len(), "URL", "URLs"),
    ));
    lines.push(format!("Site written to {}", output_dir.display()));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport, output_dir: &Path) {
    for line in format_generate_output(report, output_dir) {
        println!("{}", line);
    }
}
