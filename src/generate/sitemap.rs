//! `sitemap.xml` and `robots.txt`.
//!
//! Every route is listed once per locale, and each entry names all of its
//! language alternates (`xhtml:link rel="alternate" hreflang=…`) so search
//! engines serve the Arabic page to Arabic searchers.

use crate::i18n::{Locale, localized_path};
use maud::Escaper;
use std::fmt::{self, Write};

/// Render the sitemap for `routes` (locale-neutral paths such as `/gallery/`).
pub fn render_sitemap(base_url: &str, routes: &[String]) -> Result<String, fmt::Error> {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::new();
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        xml,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#
    )?;
    for route in routes {
        for locale in Locale::ALL {
            xml.push_str("  <url>\n    <loc>");
            Escaper::new(&mut xml).write_str(&format!("{base}{}", localized_path(route, locale)))?;
            xml.push_str("</loc>\n");
            for alt in Locale::ALL {
                alternate(&mut xml, alt.code(), &format!("{base}{}", localized_path(route, alt)))?;
            }
            alternate(
                &mut xml,
                "x-default",
                &format!("{base}{}", localized_path(route, Locale::En)),
            )?;
            xml.push_str("  </url>\n");
        }
    }
    xml.push_str("</urlset>\n");
    Ok(xml)
}

fn alternate(xml: &mut String, hreflang: &str, href: &str) -> fmt::Result {
    write!(xml, r#"    <xhtml:link rel="alternate" hreflang="{hreflang}" href=""#)?;
    Escaper::new(xml).write_str(href)?;
    xml.push_str("\"/>\n");
    Ok(())
}

pub fn render_robots(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}
