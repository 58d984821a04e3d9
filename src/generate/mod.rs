//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! complete static site, once per locale.
//!
//! ## Generated Pages
//!
//! | Route | Content |
//! |-------|---------|
//! | `/` | hero, services, brand logos, comparison table, testimonials, call to action |
//! | `/services/` | service cards and the comparison table |
//! | `/gallery/` | image grid with lightbox |
//! | `/branches/` | branch cards with map embeds, call and WhatsApp links |
//! | `/contact/` | quote wizard (`/api/leads/b2c`) and contact form (`/api/contact`) |
//! | `/business/` | fleet and dealership form (`/api/business-contact`) |
//! | `/<slug>/` | markdown pages from `pages/` |
//! | `/thanks/` | landing page after a form posted without JavaScript (not in the sitemap) |
//!
//! Arabic pages are the same routes under `/ar`. A markdown page written in
//! only one language is still published in both, so the language switch
//! never leads to a 404.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── services/index.html
//! ├── about/index.html            # pages/040-about.en.md
//! ├── ar/
//! │   ├── index.html
//! │   └── services/index.html ...
//! ├── assets/
//! │   ├── site.3fa9c21b.css       # fingerprinted
//! │   ├── site.91d0e6aa.js
//! │   └── brands/bmw.svg          # copied from content/assets/
//! ├── gallery/001-porsche-911.jpg
//! ├── 404.html
//! ├── robots.txt
//! └── sitemap.xml
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

mod layout;
mod pages;
mod sections;
mod sitemap;

use crate::assets;
use crate::config;
use crate::i18n::Locale;
use crate::scan::Manifest;
use crate::types::Page;
use layout::Ctx;
use maud::Markup;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Locale-neutral routes, in sitemap order.
    pub routes: Vec<String>,
    /// HTML files written per locale, relative to the output directory.
    pub pages: BTreeMap<Locale, Vec<String>>,
    pub stylesheet: String,
    pub script: String,
    /// Files copied from the content assets directory.
    pub assets_copied: usize,
    pub gallery_copied: usize,
}

type Renderer = fn(&Ctx) -> Markup;

/// Where the server sends visitors after a form post without the script.
pub const THANKS_ROUTE: &str = "/thanks/";

/// Built-in routes and their renderers.
const SECTIONS: &[(&str, Renderer)] = &[
    ("/", pages::render_home),
    ("/services/", pages::render_services),
    ("/gallery/", pages::render_gallery),
    ("/branches/", pages::render_branches),
    ("/contact/", pages::render_contact),
    ("/business/", pages::render_business),
];

/// Generate the site from a manifest file on disk.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_root, output_dir)
}

/// Generate the site from an in-memory manifest.
///
/// `source_root` is the content directory the manifest was scanned from;
/// gallery images and assets are copied from it.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = assets::build_stylesheet(&color_css);
    let js = assets::build_script();
    assets::write_built(output_dir, &[&css, &js])?;
    let css_href = css.href();
    let js_href = js.href();

    let assets_copied = assets::copy_tree(
        &source_root.join(&manifest.config.assets_dir),
        &output_dir.join("assets"),
    )?;

    let mut gallery_copied = 0;
    for image in &manifest.gallery {
        let target = output_dir.join(&image.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source_root.join(&image.path), &target)?;
        gallery_copied += 1;
    }

    let mut report = GenerateReport {
        stylesheet: css.filename.clone(),
        script: js.filename.clone(),
        assets_copied,
        gallery_copied,
        ..Default::default()
    };

    for locale in Locale::ALL {
        let ctx = Ctx {
            manifest,
            locale,
            css_href: &css_href,
            js_href: &js_href,
        };
        let mut written = Vec::new();
        for (route, render) in SECTIONS {
            written.push(write_page(output_dir, &ctx.href(route), render(&ctx))?);
        }
        for page in localized_pages(manifest, locale)
            .into_iter()
            .filter(|p| !p.is_link)
        {
            let route = format!("/{}/", page.slug);
            written.push(write_page(
                output_dir,
                &ctx.href(&route),
                pages::render_page(&ctx, page),
            )?);
        }
        written.push(write_page(
            output_dir,
            &ctx.href(THANKS_ROUTE),
            pages::render_thanks(&ctx),
        )?);
        report.pages.insert(locale, written);
    }

    report.routes = SECTIONS.iter().map(|(route, _)| route.to_string()).collect();
    report.routes.extend(
        localized_pages(manifest, Locale::En)
            .into_iter()
            .filter(|p| !p.is_link)
            .map(|p| format!("/{}/", p.slug)),
    );

    let not_found = Ctx {
        manifest,
        locale: Locale::En,
        css_href: &css_href,
        js_href: &js_href,
    };
    fs::write(
        output_dir.join("404.html"),
        pages::render_not_found(&not_found).into_string(),
    )?;

    let base_url = manifest.config.base_url_trimmed();
    fs::write(
        output_dir.join("sitemap.xml"),
        sitemap::render_sitemap(base_url, &report.routes)?,
    )?;
    fs::write(output_dir.join("robots.txt"), sitemap::render_robots(base_url))?;

    Ok(report)
}

/// Write `markup` to `<output>/<site_path>/index.html`; returns the relative file path.
fn write_page(output_dir: &Path, site_path: &str, markup: Markup) -> std::io::Result<String> {
    let rel_dir = site_path.trim_matches('/');
    let dir = if rel_dir.is_empty() {
        output_dir.to_path_buf()
    } else {
        output_dir.join(rel_dir)
    };
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), markup.into_string())?;
    Ok(if rel_dir.is_empty() {
        "index.html".to_string()
    } else {
        format!("{rel_dir}/index.html")
    })
}

/// Markdown pages to publish in `locale`, in nav order.
///
/// Every slug appears once: the page written in `locale` if there is one,
/// otherwise the version from the other locale.
pub(crate) fn localized_pages(manifest: &Manifest, locale: Locale) -> Vec<&Page> {
    let mut chosen: BTreeMap<&str, &Page> = BTreeMap::new();
    for page in &manifest.pages {
        let entry = chosen.entry(page.slug.as_str()).or_insert(page);
        if page.locale == locale {
            *entry = page;
        }
    }
    let mut pages: Vec<&Page> = chosen.into_values().collect();
    pages.sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    pages
}
