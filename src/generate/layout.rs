//! Shared page chrome: document head, header with nav drawer and toggles, footer.

use super::localized_pages;
use crate::i18n::{Locale, LocalizedText, localized_path};
use crate::scan::Manifest;
use crate::types::NavItem;
use maud::{DOCTYPE, Markup, html};

/// Everything a page renderer needs besides its own data.
#[derive(Clone, Copy)]
pub struct Ctx<'a> {
    pub manifest: &'a Manifest,
    pub locale: Locale,
    pub css_href: &'a str,
    pub js_href: &'a str,
}

impl<'a> Ctx<'a> {
    /// Translated UI string.
    pub fn t(&self, key: &'a str) -> &'a str {
        self.manifest.translations.get(self.locale, key)
    }

    /// Data-table text in the current locale.
    pub fn text(&self, text: &'a LocalizedText) -> &'a str {
        text.get(self.locale)
    }

    /// Site path of `route` in the current locale.
    pub fn href(&self, route: &str) -> String {
        localized_path(route, self.locale)
    }

    /// Absolute URL of `route` in `locale`, for canonical and hreflang links.
    pub fn absolute(&self, route: &str, locale: Locale) -> String {
        format!(
            "{}{}",
            self.manifest.config.base_url_trimmed(),
            localized_path(route, locale)
        )
    }
}

/// Built-in sections linked from the header, in nav order.
const NAV_SECTIONS: &[(&str, &str)] = &[
    ("/", "nav.home"),
    ("/services/", "nav.services"),
    ("/gallery/", "nav.gallery"),
    ("/branches/", "nav.branches"),
    ("/contact/", "nav.contact"),
    ("/business/", "nav.business"),
];

/// Header navigation for a locale: built-in sections, then numbered pages.
pub fn nav_items(ctx: &Ctx) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = NAV_SECTIONS
        .iter()
        .map(|&(route, key)| NavItem {
            label: ctx.t(key).to_string(),
            href: ctx.href(route),
            external: false,
        })
        .collect();
    for page in localized_pages(ctx.manifest, ctx.locale)
        .into_iter()
        .filter(|p| p.in_nav)
    {
        items.push(if page.is_link {
            NavItem {
                label: page.link_title.clone(),
                href: page.body.clone(),
                external: true,
            }
        } else {
            NavItem {
                label: page.title.clone(),
                href: ctx.href(&format!("/{}/", page.slug)),
                external: false,
            }
        });
    }
    items
}

/// Full HTML document. `route` is the locale-neutral path of the page, used
/// for the language switch and alternate links; `None` for the 404 page.
pub fn base_document(ctx: &Ctx, title: &str, route: Option<&str>, content: Markup) -> Markup {
    let site_name = ctx.manifest.config.site_name.as_str();
    html! {
        (DOCTYPE)
        html lang=(ctx.locale.code()) dir=(ctx.locale.dir()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | " (site_name) }
                meta name="description" content=(ctx.t("meta.description"));
                @if let Some(route) = route {
                    link rel="canonical" href=(ctx.absolute(route, ctx.locale));
                    @for alt in Locale::ALL {
                        link rel="alternate" hreflang=(alt.code()) href=(ctx.absolute(route, alt));
                    }
                    link rel="alternate" hreflang="x-default" href=(ctx.absolute(route, Locale::En));
                }
                link rel="stylesheet" href=(ctx.css_href);
                script src=(ctx.js_href) defer {}
            }
            body {
                (site_header(ctx, route.unwrap_or("/")))
                main id="main" {
                    (content)
                }
                (site_footer(ctx))
            }
        }
    }
}

/// Header: brand, hamburger drawer, language switch, theme toggle.
fn site_header(ctx: &Ctx, route: &str) -> Markup {
    let current = ctx.href(route);
    let other = ctx.locale.other();
    html! {
        header.site-header {
            div.container {
                a.brand href=(ctx.href("/")) { (ctx.manifest.config.site_name) }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label=(ctx.t("nav.menu")) {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                nav.site-nav aria-label=(ctx.t("nav.menu")) {
                    ul {
                        @for item in nav_items(ctx) {
                            @let is_current = !item.external && item.href == current;
                            li class=[is_current.then_some("current")] {
                                @if item.external {
                                    a href=(item.href) target="_blank" rel="noopener" { (item.label) }
                                } @else {
                                    a href=(item.href) aria-current=[is_current.then_some("page")] { (item.label) }
                                }
                            }
                        }
                    }
                }
                div.header-tools {
                    a.lang-switch href=(localized_path(route, other)) hreflang=(other.code()) lang=(other.code()) {
                        (other.native_name())
                    }
                    button.theme-toggle type="button" data-theme-toggle aria-label=(ctx.t("theme.toggle")) {
                        "◐"
                    }
                }
            }
        }
    }
}

/// Footer: tagline, branch phone numbers, copyright.
fn site_footer(ctx: &Ctx) -> Markup {
    let branches = &ctx.manifest.branches;
    html! {
        footer.site-footer {
            div.container {
                p { (ctx.t("footer.tagline")) }
                @if !branches.is_empty() {
                    h2.visually-hidden { (ctx.t("footer.branches")) }
                    ul {
                        @for branch in branches {
                            li {
                                (ctx.text(&branch.name)) ": "
                                a href=(branch.tel_href()) dir="ltr" { (branch.phone) }
                            }
                        }
                    }
                }
                p { "© " (ctx.manifest.config.site_name) ". " (ctx.t("footer.rights")) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_manifest;

    fn ctx(manifest: &Manifest, locale: Locale) -> Ctx<'_> {
        Ctx {
            manifest,
            locale,
            css_href: "/assets/site.00000000.css",
            js_href: "/assets/site.00000000.js",
        }
    }

    #[test]
    fn document_sets_lang_and_dir() {
        let manifest = sample_manifest();
        let doc = base_document(&ctx(&manifest, Locale::Ar), "Test", Some("/"), html! {}).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="ar" dir="rtl">"#));

        let doc = base_document(&ctx(&manifest, Locale::En), "Test", Some("/"), html! {}).into_string();
        assert!(doc.contains(r#"<html lang="en" dir="ltr">"#));
    }

    #[test]
    fn document_links_alternates() {
        let manifest = sample_manifest();
        let doc = base_document(&ctx(&manifest, Locale::En), "Services", Some("/services/"), html! {})
            .into_string();
        assert!(doc.contains(r#"hreflang="ar" href="https://example.com/ar/services/""#));
        assert!(doc.contains(r#"hreflang="x-default" href="https://example.com/services/""#));
        assert!(doc.contains(r#"rel="canonical" href="https://example.com/services/""#));
    }

    #[test]
    fn not_found_document_has_no_alternates() {
        let manifest = sample_manifest();
        let doc = base_document(&ctx(&manifest, Locale::En), "Not found", None, html! {}).into_string();
        assert!(!doc.contains("hreflang=\"ar\" href="));
        assert!(!doc.contains("canonical"));
    }

    #[test]
    fn language_switch_points_to_same_page() {
        let manifest = sample_manifest();
        let header = site_header(&ctx(&manifest, Locale::Ar), "/gallery/").into_string();
        assert!(header.contains(r#"class="lang-switch" href="/gallery/""#));
        let header = site_header(&ctx(&manifest, Locale::En), "/gallery/").into_string();
        assert!(header.contains(r#"class="lang-switch" href="/ar/gallery/""#));
    }

    #[test]
    fn current_nav_item_marked() {
        let manifest = sample_manifest();
        let header = site_header(&ctx(&manifest, Locale::En), "/branches/").into_string();
        assert!(header.contains(r#"<li class="current"><a href="/branches/" aria-current="page">"#));
    }

    #[test]
    fn nav_items_include_numbered_pages_and_links() {
        let manifest = sample_manifest();
        let items = nav_items(&ctx(&manifest, Locale::Ar));
        let hrefs: Vec<&str> = items.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(hrefs[0], "/ar/");
        assert!(hrefs.contains(&"/ar/about/"));
        assert!(!hrefs.contains(&"/ar/warranty/"));
        let link = items.iter().find(|i| i.external).unwrap();
        assert_eq!(link.href, "https://instagram.com/shieldautocare");
    }

    #[test]
    fn footer_lists_branch_phones() {
        let manifest = sample_manifest();
        let footer = site_footer(&ctx(&manifest, Locale::En)).into_string();
        assert!(footer.contains(r#"href="tel:+201001234567""#));
    }
}
