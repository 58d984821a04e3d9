//! Shared test utilities for the ppf-site test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! structures (`Manifest`, `Page`, `Branch`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let about = find_page(&manifest, "about", Locale::Ar);
//! assert_eq!(about.title, "من نحن");
//! assert_eq!(branch_ids(&manifest), vec!["new-cairo", "sheikh-zayed", "dubai-al-quoz"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assets::copy_tree;
use crate::i18n::Locale;
use crate::scan::{Manifest, scan};
use crate::types::Page;

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_tree(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Scan a fresh copy of the fixtures.
pub fn sample_manifest() -> Manifest {
    let tmp = setup_fixtures();
    scan(tmp.path()).unwrap()
}

/// Find a page by slug and locale. Panics with the available pages if missing.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str, locale: Locale) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug && p.locale == locale)
        .unwrap_or_else(|| {
            let available: Vec<String> = manifest
                .pages
                .iter()
                .map(|p| format!("{}.{}", p.slug, p.locale.code()))
                .collect();
            panic!("page '{slug}' ({}) not found. Available: {available:?}", locale.code())
        })
}

/// Branch ids in table order.
pub fn branch_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.branches.iter().map(|b| b.id.as_str()).collect()
}
