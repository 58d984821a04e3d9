//! # ppf-site
//!
//! Bilingual (English/Arabic) marketing site and lead-form server for a
//! paint protection film studio with branches in Egypt and the UAE. The
//! content directory is the data source: TOML tables hold branches,
//! services, testimonials and translations, markdown files become pages,
//! and numbered images become the gallery.
//!
//! # Architecture: Pipeline Plus Server
//!
//! The site is built in two independent stages. Scan writes a JSON manifest
//! that generate consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json   (filesystem → structured data)
//! 2. Generate  manifest  →  dist/           (HTML per locale, assets, sitemap)
//! 3. Serve     dist/ + config → HTTP        (static files + form API)
//! ```
//!
//! The manifest is human-readable, so a broken page can be traced to the data
//! that produced it, and each stage can be tested without the other.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config, translations, data tables, pages and gallery into the manifest |
//! | [`generate`] | Stage 2: renders every page in both locales with Maud, writes assets and sitemap |
//! | [`server`] | axum server for `/api/contact`, `/api/business-contact`, `/api/leads/b2c` and static files |
//! | [`forms`] | Field definitions, validation, spam checks and inbox routing for the lead forms |
//! | [`mail`] | Email composition and delivery (Resend API or log-only) |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation, color CSS |
//! | [`i18n`] | Locales, `/ar` path rewriting, translation dictionaries with English fallback |
//! | [`types`] | Data-table rows shared between stages (`Branch`, `Service`, `Page`, ...) |
//! | [`assets`] | Embedded CSS/JS, content fingerprinting, asset copying |
//! | [`naming`] | `NNN-name[.locale]` filename convention parser |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Server-Rendered Widgets
//!
//! Every widget (nav drawer, carousel, gallery lightbox, quote wizard, map
//! embeds, theme and language toggles) is plain HTML that works without
//! JavaScript. One small embedded script adds the interactive parts. The nav
//! drawer is a CSS checkbox toggle; the wizard degrades to one long form.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Templates are Rust code, malformed markup is a build
//! error, and all interpolation is escaped, which matters for a site that
//! renders customer-supplied text in notification emails.
//!
//! ## Locale Routing as a Path Rewrite
//!
//! Every page exists in both locales at the same path, with Arabic under
//! `/ar`. The language switch is [`i18n::localized_path`] and never needs a
//! lookup table. Missing Arabic strings fall back to English instead of
//! rendering blank.
//!
//! ## Spam Without CAPTCHAs
//!
//! Forms carry a hidden honeypot input and the script reports how long the
//! visitor spent on the page. Bots that fill every field or submit instantly
//! get the normal success response, so they have nothing to learn from, and
//! no email is sent. Forms posted without the script still go through: they
//! are checked by honeypot alone and land on a localized thank-you page.
//!
//! ## Fingerprinted Assets
//!
//! The stylesheet and script are written as `site.<hash>.css` and
//! `site.<hash>.js`, so they can be cached forever and a deploy that changes
//! them is picked up immediately.

pub mod assets;
pub mod config;
pub mod forms;
pub mod generate;
pub mod i18n;
pub mod mail;
pub mod naming;
pub mod output;
pub mod scan;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
