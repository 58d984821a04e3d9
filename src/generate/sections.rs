//! Reusable page sections and form controls.

use super::layout::Ctx;
use crate::forms::{FieldSpec, FormKind, Rule};
use maud::{Markup, html};

/// Half-width in degrees of the map area shown around a branch.
const MAP_SPAN: f64 = 0.01;

/// Service cards, each linking to the quote wizard.
pub fn service_cards(ctx: &Ctx) -> Markup {
    html! {
        div.card-grid {
            @for service in &ctx.manifest.services {
                article.card id=(service.id) {
                    @if let Some(icon) = &service.icon {
                        img src=(format!("/assets/{icon}")) alt="" width="48" height="48" loading="lazy";
                    }
                    h3 { (ctx.text(&service.title)) }
                    p { (ctx.text(&service.summary)) }
                    a href=(format!("{}?service={}", ctx.href("/contact/"), service.id)) {
                        (ctx.t("services.quote"))
                    }
                }
            }
        }
    }
}

/// Logo strip of serviced car brands.
pub fn brand_strip(ctx: &Ctx) -> Markup {
    html! {
        @if !ctx.manifest.brands.is_empty() {
            ul.brand-strip {
                @for brand in &ctx.manifest.brands {
                    li {
                        img src=(format!("/assets/{}", brand.logo)) alt=(brand.name) title=(brand.name) loading="lazy";
                    }
                }
            }
        }
    }
}

/// The feature comparison table; nothing when it has no rows.
pub fn comparison_table(ctx: &Ctx) -> Markup {
    let comparison = &ctx.manifest.comparison;
    html! {
        @if !comparison.rows.is_empty() {
            table.comparison {
                thead {
                    tr {
                        th scope="col" { (ctx.t("comparison.feature")) }
                        @for column in &comparison.columns {
                            th scope="col" { (ctx.text(column)) }
                        }
                    }
                }
                tbody {
                    @for row in &comparison.rows {
                        tr {
                            th scope="row" { (ctx.text(&row.feature)) }
                            @for value in &row.values {
                                td { (ctx.text(value)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Auto-scrolling testimonial carousel. Without the script it is a
/// horizontally scrollable row.
pub fn testimonial_carousel(ctx: &Ctx) -> Markup {
    html! {
        @if !ctx.manifest.testimonials.is_empty() {
            div.carousel data-carousel data-interval="6000" tabindex="0" {
                @for testimonial in &ctx.manifest.testimonials {
                    figure.testimonial {
                        div.rating aria-label=(ctx.manifest.translations.format(
                            ctx.locale,
                            "testimonials.rating",
                            &[("rating", &testimonial.rating.to_string())],
                        )) {
                            (stars(testimonial.rating))
                        }
                        blockquote { (ctx.text(&testimonial.quote)) }
                        figcaption {
                            (testimonial.author)
                            @if let Some(car) = &testimonial.car {
                                " · " span dir="ltr" { (car) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// `★★★★☆` for a 1-5 rating.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// OpenStreetMap embed URL centered on a point with a marker.
pub fn osm_embed_url(lat: f64, lng: f64) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.5}%2C{:.5}%2C{:.5}%2C{:.5}&layer=mapnik&marker={:.5}%2C{:.5}",
        lng - MAP_SPAN,
        lat - MAP_SPAN,
        lng + MAP_SPAN,
        lat + MAP_SPAN,
        lat,
        lng
    )
}

/// Full-page OpenStreetMap link for directions.
pub fn osm_link(lat: f64, lng: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lng:.5}#map=16/{lat:.5}/{lng:.5}")
}

/// A lead form: endpoint and message attributes for the script, the
/// honeypot, the page locale, the fields, and a status line.
///
/// Without the script the form still posts natively to the same endpoint.
pub fn lead_form(ctx: &Ctx, kind: FormKind, id: &str, wizard: bool, body: Markup) -> Markup {
    html! {
        form.form id=(id) method="post" action=(kind.endpoint()) novalidate
            data-endpoint=(kind.endpoint())
            data-success=(ctx.t(success_key(kind)))
            data-failure=(ctx.t("form.failure"))
            data-wizard[wizard] {
            (honeypot(ctx, id))
            input type="hidden" name="locale" value=(ctx.locale.code());
            (body)
            p.form-status role="status" aria-live="polite" {}
        }
    }
}

fn success_key(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Contact => "contact.success",
        FormKind::Business => "business.success",
        FormKind::Lead => "wizard.success",
    }
}

/// The spam trap: a field people never see or fill in.
fn honeypot(ctx: &Ctx, form_id: &str) -> Markup {
    let name = ctx.manifest.config.forms.honeypot_field.as_str();
    let id = format!("{form_id}-{name}");
    html! {
        div.visually-hidden aria-hidden="true" {
            label for=(id) { (ctx.t("form.honeypot")) }
            input id=(id) type="text" name=(name) tabindex="-1" autocomplete="off";
        }
    }
}

/// Label, control and error slot for one field of `kind`.
///
/// `service` and `branch` render as selectors over the data tables.
pub fn form_field(ctx: &Ctx, kind: FormKind, spec: &FieldSpec) -> Markup {
    let id = format!("{}-{}", kind, spec.name);
    let label_key = format!("form.{}", spec.name);
    let label = ctx.manifest.translations.get(ctx.locale, &label_key).to_string();
    html! {
        div.field {
            label for=(id) {
                (label)
                @if !spec.required {
                    " " small { (ctx.t("form.optional")) }
                }
            }
            (control(ctx, spec, &id))
            span.field-error data-error-for=(spec.name) aria-live="polite" {}
        }
    }
}

fn control(ctx: &Ctx, spec: &FieldSpec, id: &str) -> Markup {
    let name = spec.name;
    let required = spec.required;
    match (name, spec.rule) {
        ("service", _) => html! {
            select id=(id) name=(name) required[required] {
                option value="" { (ctx.t("form.choose")) }
                @for service in &ctx.manifest.services {
                    option value=(service.id) { (ctx.text(&service.title)) }
                }
            }
        },
        ("branch", _) => html! {
            select id=(id) name=(name) required[required] {
                option value="" { (ctx.t("form.choose")) }
                @for branch in &ctx.manifest.branches {
                    option value=(branch.id) { (ctx.text(&branch.name)) " (" (ctx.text(&branch.city)) ")" }
                }
            }
        },
        (_, Rule::Message) => html! {
            textarea id=(id) name=(name) rows="5"
                maxlength=(ctx.manifest.config.forms.max_message_len)
                required[required] {}
        },
        (_, Rule::Email) => html! {
            input id=(id) type="email" name=(name) autocomplete="email" dir="ltr" required[required];
        },
        (_, Rule::Phone) => html! {
            input id=(id) type="tel" name=(name) autocomplete="tel" dir="ltr" required[required];
        },
        (_, Rule::Name) => html! {
            input id=(id) type="text" name=(name) autocomplete="name" maxlength="100" required[required];
        },
        (_, Rule::Text) => html! {
            input id=(id) type="text" name=(name) maxlength="200" required[required];
        },
    }
}
