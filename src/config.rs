//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered over stock defaults, so a config file only lists what it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! site_name = "Shield Auto Care"
//! base_url = "https://example.com"
//! assets_dir = "assets"
//!
//! [colors.light]
//! background = "#ffffff"
//! accent = "#c8102e"
//!
//! [forms]
//! honeypot_field = "website"
//! min_elapsed_ms = 3000
//!
//! [mail]
//! transport = "resend"          # or "log"
//! from = "Website <noreply@example.com>"
//! inbox_egypt = "sales-eg@example.com"
//! inbox_uae = "sales-ae@example.com"
//! fallback_inbox = "egypt"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! ```
//!
//! The Resend API key is never read from this file. It comes from the
//! `RESEND_API_KEY` environment variable at serve time.
//!
//! Unknown keys are rejected to catch typos early.

use crate::forms::FormKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business name shown in titles, header and emails.
    pub site_name: String,
    /// Absolute site URL, used for canonical links and the sitemap.
    pub base_url: String,
    /// Directory (relative to the content root) copied to `assets/` in the output.
    pub assets_dir: String,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Anti-spam and length limits for the lead forms.
    pub forms: FormsConfig,
    /// Outgoing email transport and destination inboxes.
    pub mail: MailConfig,
    /// HTTP server settings for `serve`.
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Shield Auto Care".to_string(),
            base_url: "https://example.com".to_string(),
            assets_dir: "assets".to_string(),
            colors: ColorConfig::default(),
            forms: FormsConfig::default(),
            mail: MailConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "base_url must be an absolute http(s) URL".into(),
            ));
        }
        if self.forms.min_elapsed_ms > 60_000 {
            return Err(ConfigError::Validation(
                "forms.min_elapsed_ms must be at most 60000".into(),
            ));
        }
        let honeypot = self.forms.honeypot_field.trim();
        if honeypot.is_empty() {
            return Err(ConfigError::Validation(
                "forms.honeypot_field must not be empty".into(),
            ));
        }
        let taken = ["locale", "elapsed_ms"].contains(&honeypot)
            || FormKind::ALL.iter().any(|kind| kind.field(honeypot).is_some());
        if taken {
            return Err(ConfigError::Validation(format!(
                "forms.honeypot_field '{honeypot}' is a real form field"
            )));
        }
        for (key, addr) in [
            ("mail.inbox_egypt", Some(&self.mail.inbox_egypt)),
            ("mail.inbox_uae", Some(&self.mail.inbox_uae)),
            ("mail.business_inbox", self.mail.business_inbox.as_ref()),
        ] {
            if let Some(addr) = addr
                && !addr.contains('@')
            {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an email address"
                )));
            }
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_body_bytes must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// `base_url` without a trailing slash, for joining with site paths.
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Lead form limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    /// Name of the hidden input that only bots fill in.
    pub honeypot_field: String,
    /// Submissions made faster than this after page load are treated as spam.
    pub min_elapsed_ms: u64,
    /// Maximum message length in characters.
    pub max_message_len: usize,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            honeypot_field: "website".to_string(),
            min_elapsed_ms: 3000,
            max_message_len: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Send through the Resend HTTP API.
    Resend,
    /// Log emails instead of sending them (development).
    Log,
}

/// Which sales inbox receives leads whose phone country is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackInbox {
    Egypt,
    Uae,
}

/// Outgoing email settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailConfig {
    pub transport: MailTransport,
    /// Sender, e.g. `"Website <noreply@example.com>"`.
    pub from: String,
    /// Sales inbox for Egyptian leads.
    pub inbox_egypt: String,
    /// Sales inbox for UAE leads.
    pub inbox_uae: String,
    pub fallback_inbox: FallbackInbox,
    /// Receives business (B2B) enquiries when set; otherwise they route by phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_inbox: Option<String>,
    /// Resend API base URL.
    pub api_base: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Log,
            from: "Website <noreply@example.com>".to_string(),
            inbox_egypt: "sales-eg@example.com".to_string(),
            inbox_uae: "sales-ae@example.com".to_string(),
            fallback_inbox: FallbackInbox::Egypt,
            business_inbox: None,
            api_base: "https://api.resend.com".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Cards, header, form panels.
    pub surface: String,
    pub text: String,
    /// Secondary text: captions, footer, hints.
    pub text_muted: String,
    /// Buttons, links and highlights.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f5f7".to_string(),
            text: "#15171a".to_string(),
            text_muted: "#5f6670".to_string(),
            accent: "#c8102e".to_string(),
            border: "#dde1e6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0c0d10".to_string(),
            surface: "#17191e".to_string(),
            text: "#eef0f3".to_string(),
            text_muted: "#9aa1ab".to_string(),
            accent: "#ff3b4f".to_string(),
            border: "#2a2e35".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Business name used in page titles, the header and email subjects.
site_name = "Shield Auto Care"

# Absolute URL of the deployed site (canonical links, sitemap.xml).
base_url = "https://example.com"

# Directory copied to /assets/ in the output (brand logos, icons, favicon).
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f5f7"       # Cards, header, form panels
text = "#15171a"
text_muted = "#5f6670"    # Captions, footer, hints
accent = "#c8102e"        # Buttons, links, highlights
border = "#dde1e6"

# ---------------------------------------------------------------------------
# Colors - Dark mode (system preference or the theme toggle)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0c0d10"
surface = "#17191e"
text = "#eef0f3"
text_muted = "#9aa1ab"
accent = "#ff3b4f"
border = "#2a2e35"

# ---------------------------------------------------------------------------
# Lead forms
# ---------------------------------------------------------------------------
[forms]
# Hidden input that real visitors never fill in. Non-empty means spam.
honeypot_field = "website"

# Submissions sent faster than this after the page loaded are spam.
min_elapsed_ms = 3000

# Maximum message length in characters.
max_message_len = 2000

# ---------------------------------------------------------------------------
# Email
# ---------------------------------------------------------------------------
[mail]
# "resend" sends through the Resend API (needs RESEND_API_KEY in the
# environment); "log" only logs the email.
transport = "log"
from = "Website <noreply@example.com>"

# Leads are routed by the country code of the submitted phone number.
inbox_egypt = "sales-eg@example.com"
inbox_uae = "sales-ae@example.com"

# Inbox for numbers that are neither Egyptian nor Emirati: "egypt" or "uae".
fallback_inbox = "egypt"

# Business enquiries go here when set, otherwise they route by phone.
# business_inbox = "fleet@example.com"

api_base = "https://api.resend.com"

# ---------------------------------------------------------------------------
# Server (ppf-site serve)
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1:8080"
max_body_bytes = 65536
"##
}

/// Generate CSS custom properties from color config.
///
/// Dark colors apply when the system prefers dark and no explicit light theme
/// was chosen, and whenever the toggle sets `data-theme="dark"`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let light = scheme_vars(&colors.light);
    let dark = scheme_vars(&colors.dark);
    format!(
        r#":root {{
{light}}}

@media (prefers-color-scheme: dark) {{
    :root:not([data-theme="light"]) {{
{dark_nested}    }}
}}

:root[data-theme="dark"] {{
{dark}}}
"#,
        dark_nested = indent_lines(&dark, "    "),
    )
}

fn scheme_vars(scheme: &ColorScheme) -> String {
    format!(
        "    --color-bg: {};\n    --color-surface: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-accent: {};\n    --color-border: {};\n",
        scheme.background,
        scheme.surface,
        scheme.text,
        scheme.text_muted,
        scheme.accent,
        scheme.border,
    )
}

fn indent_lines(text: &str, pad: &str) -> String {
    text.lines().map(|l| format!("{pad}{l}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn default_forms_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.forms.honeypot_field, "website");
        assert_eq!(config.forms.min_elapsed_ms, 3000);
        assert_eq!(config.mail.transport, MailTransport::Log);
        assert_eq!(config.mail.fallback_inbox, FallbackInbox::Egypt);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
accent = "#0055ff"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.accent, "#0055ff");
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.accent, "#ff3b4f");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Shield Auto Care");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
site_name = "Armor Films"

[mail]
transport = "resend"
inbox_uae = "dubai@armor.test"
fallback_inbox = "uae"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Armor Films");
        assert_eq!(config.mail.transport, MailTransport::Resend);
        assert_eq!(config.mail.inbox_uae, "dubai@armor.test");
        assert_eq!(config.mail.inbox_egypt, "sales-eg@example.com");
        assert_eq!(config.mail.fallback_inbox, FallbackInbox::Uae);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[forms]\nhoneypot = \"x\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn api_key_is_not_a_config_key() {
        let toml = "[mail]\napi_key = \"re_123\"\n";
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let config = SiteConfig {
            base_url: "example.com".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_honeypot_named_like_a_field() {
        for name in ["phone", "company", "car_brand", "locale"] {
            let mut config = SiteConfig::default();
            config.forms.honeypot_field = name.into();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(msg)) if msg.contains(name)),
                "{name}"
            );
        }
        let mut config = SiteConfig::default();
        config.forms.honeypot_field = "fax".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_inbox() {
        let mut config = SiteConfig::default();
        config.mail.business_inbox = Some("fleet".into());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(msg)) if msg.contains("business_inbox")));
    }

    #[test]
    fn validate_rejects_long_min_elapsed() {
        let mut config = SiteConfig::default();
        config.forms.min_elapsed_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[mail]\nfrom = \"a\"\ninbox_uae = \"b\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[mail]\nfrom = \"c\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        let mail = merged.get("mail").unwrap();
        assert_eq!(mail.get("from").unwrap().as_str(), Some("c"));
        assert_eq!(mail.get("inbox_uae").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_name, defaults.site_name);
        assert_eq!(config.forms.min_elapsed_ms, defaults.forms.min_elapsed_ms);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
        assert_eq!(config.server.max_body_bytes, defaults.server.max_body_bytes);
        assert_eq!(config.mail.business_inbox, None);
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg:",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
            "--color-accent:",
            "--color-border:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
    }

    #[test]
    fn generate_css_supports_theme_toggle() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains(r#":root[data-theme="dark"]"#));
        assert!(css.contains(r#":root:not([data-theme="light"])"#));
    }

    #[test]
    fn base_url_trimmed_drops_slash() {
        let config = SiteConfig {
            base_url: "https://example.com/".into(),
            ..SiteConfig::default()
        };
        assert_eq!(config.base_url_trimmed(), "https://example.com");
    }
}
