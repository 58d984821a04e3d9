//! Page renderers. Each returns a full document for one locale.

use super::layout::{Ctx, base_document};
use super::sections::{
    brand_strip, comparison_table, form_field, lead_form, osm_embed_url, osm_link,
    service_cards, testimonial_carousel,
};
use crate::forms::FormKind;
use crate::types::Page;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// Quote wizard steps: progress label key and the lead fields on that step.
pub const WIZARD_STEPS: &[(&str, &[&str])] = &[
    ("wizard.step.details", &["name", "phone", "email"]),
    ("wizard.step.vehicle", &["car_brand", "car_model", "service"]),
    ("wizard.step.visit", &["branch", "message"]),
];

pub fn render_home(ctx: &Ctx) -> Markup {
    let content = html! {
        section.hero {
            div.container {
                h1 { (ctx.t("home.hero.title")) }
                p { (ctx.t("home.hero.subtitle")) }
                a.button href=(ctx.href("/contact/")) { (ctx.t("home.hero.cta")) }
                " "
                a.button.secondary href=(ctx.href("/services/")) { (ctx.t("home.hero.secondary")) }
            }
        }
        section {
            div.container {
                h2 { (ctx.t("home.services.title")) }
                (service_cards(ctx))
            }
        }
        @if !ctx.manifest.brands.is_empty() {
            section {
                div.container {
                    h2 { (ctx.t("home.brands.title")) }
                    (brand_strip(ctx))
                }
            }
        }
        @if !ctx.manifest.comparison.rows.is_empty() {
            section {
                div.container {
                    h2 { (ctx.t("home.comparison.title")) }
                    (comparison_table(ctx))
                }
            }
        }
        @if !ctx.manifest.testimonials.is_empty() {
            section {
                div.container {
                    h2 { (ctx.t("home.testimonials.title")) }
                    (testimonial_carousel(ctx))
                }
            }
        }
        section.cta {
            div.container {
                h2 { (ctx.t("home.cta.title")) }
                p { (ctx.t("home.cta.text")) }
                a.button href=(ctx.href("/contact/")) { (ctx.t("home.cta.button")) }
            }
        }
    };
    base_document(ctx, ctx.t("nav.home"), Some("/"), content)
}

pub fn render_services(ctx: &Ctx) -> Markup {
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("services.title")) }
                p { (ctx.t("services.intro")) }
                (service_cards(ctx))
            }
        }
        @if !ctx.manifest.comparison.rows.is_empty() {
            section {
                div.container {
                    h2 { (ctx.t("home.comparison.title")) }
                    (comparison_table(ctx))
                }
            }
        }
    };
    base_document(ctx, ctx.t("services.title"), Some("/services/"), content)
}

/// Image grid. Images below the first row load lazily; the lightbox opens
/// the clicked image full size.
pub fn render_gallery(ctx: &Ctx) -> Markup {
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("gallery.title")) }
                p { (ctx.t("gallery.intro")) }
                div.gallery-grid data-gallery {
                    @for (idx, image) in ctx.manifest.gallery.iter().enumerate() {
                        figure {
                            img src=(format!("/{}", image.path))
                                data-full=(format!("/{}", image.path))
                                alt=(ctx.text(&image.caption))
                                loading=(if idx < 3 { "eager" } else { "lazy" })
                                decoding="async";
                            figcaption { (ctx.text(&image.caption)) }
                        }
                    }
                }
            }
        }
        div.lightbox data-lightbox role="dialog" aria-label=(ctx.t("gallery.close")) {
            img alt="";
        }
    };
    base_document(ctx, ctx.t("gallery.title"), Some("/gallery/"), content)
}

pub fn render_branches(ctx: &Ctx) -> Markup {
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("branches.title")) }
                p { (ctx.t("branches.intro")) }
                div.card-grid {
                    @for branch in &ctx.manifest.branches {
                        article.card.branch-card id=(branch.id) {
                            h2 { (ctx.text(&branch.name)) }
                            p { (ctx.text(&branch.address)) ", " (ctx.text(&branch.city)) }
                            @if let Some(hours) = &branch.hours {
                                p { strong { (ctx.t("branches.hours")) } " " (ctx.text(hours)) }
                            }
                            iframe src=(osm_embed_url(branch.lat, branch.lng))
                                title=(format!("{}: {}", ctx.t("branches.map_title"), ctx.text(&branch.name)))
                                loading="lazy"
                                referrerpolicy="no-referrer" {}
                            div.branch-links {
                                a.button href=(branch.tel_href()) { (ctx.t("branches.call")) }
                                @if let Some(wa) = branch.whatsapp_href() {
                                    a.button.secondary href=(wa) target="_blank" rel="noopener" {
                                        (ctx.t("branches.whatsapp"))
                                    }
                                }
                                a href=(osm_link(branch.lat, branch.lng)) target="_blank" rel="noopener" {
                                    (ctx.t("branches.directions"))
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, ctx.t("branches.title"), Some("/branches/"), content)
}

/// Quote wizard plus the short contact form.
pub fn render_contact(ctx: &Ctx) -> Markup {
    let kind = FormKind::Lead;
    let wizard = html! {
        ol.wizard-progress {
            @for (label, _) in WIZARD_STEPS {
                li { (ctx.t(label)) }
            }
        }
        @for (idx, (label, fields)) in WIZARD_STEPS.iter().enumerate() {
            fieldset.wizard-step {
                legend { (ctx.t(label)) }
                @for name in fields.iter() {
                    @if let Some(spec) = kind.field(name) {
                        (form_field(ctx, kind, spec))
                    }
                }
                div.wizard-nav {
                    @if idx > 0 {
                        button.button.secondary type="button" data-prev { (ctx.t("wizard.back")) }
                    }
                    @if idx + 1 < WIZARD_STEPS.len() {
                        button.button type="button" data-next { (ctx.t("wizard.next")) }
                    } @else {
                        button.button type="submit" { (ctx.t("wizard.submit")) }
                    }
                }
            }
        }
    };

    let contact = FormKind::Contact;
    let simple = html! {
        @for spec in contact.fields() {
            (form_field(ctx, contact, spec))
        }
        button.button type="submit" { (ctx.t("contact.submit")) }
    };

    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("contact.title")) }
                p { (ctx.t("contact.intro")) }
                h2 { (ctx.t("wizard.title")) }
                (lead_form(ctx, kind, "quote-wizard", true, wizard))
            }
        }
        section {
            div.container {
                h2 { (ctx.t("contact.simple.title")) }
                (lead_form(ctx, contact, "contact-form", false, simple))
            }
        }
    };
    base_document(ctx, ctx.t("contact.title"), Some("/contact/"), content)
}

pub fn render_business(ctx: &Ctx) -> Markup {
    let kind = FormKind::Business;
    let fields = html! {
        @for spec in kind.fields() {
            (form_field(ctx, kind, spec))
        }
        button.button type="submit" { (ctx.t("business.submit")) }
    };
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("business.title")) }
                p { (ctx.t("business.intro")) }
                (lead_form(ctx, kind, "business-form", false, fields))
            }
        }
    };
    base_document(ctx, ctx.t("business.title"), Some("/business/"), content)
}

/// A markdown page at `/<slug>/`.
pub fn render_page(ctx: &Ctx, page: &Page) -> Markup {
    let parser = Parser::new(&page.body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    // A page shown in the other locale's language keeps its own direction.
    let lang = (page.locale != ctx.locale).then(|| page.locale.code());
    let dir = (page.locale != ctx.locale).then(|| page.locale.dir());
    let content = html! {
        section {
            div.container {
                article.prose lang=[lang] dir=[dir] {
                    (PreEscaped(body_html))
                }
            }
        }
    };
    let route = format!("/{}/", page.slug);
    base_document(ctx, &page.title, Some(route.as_str()), content)
}

/// Where a form posted without the script lands after it was accepted.
pub fn render_thanks(ctx: &Ctx) -> Markup {
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("thanks.title")) }
                p { (ctx.t("thanks.text")) }
                a.button href=(ctx.href("/")) { (ctx.t("notfound.home")) }
            }
        }
    };
    base_document(ctx, ctx.t("thanks.title"), None, content)
}

pub fn render_not_found(ctx: &Ctx) -> Markup {
    let content = html! {
        section {
            div.container {
                h1 { (ctx.t("notfound.title")) }
                p { (ctx.t("notfound.text")) }
                a.button href=(ctx.href("/")) { (ctx.t("notfound.home")) }
            }
        }
    };
    base_document(ctx, ctx.t("notfound.title"), None, content)
}
