//! Anti-spam heuristics: a honeypot field and a minimum time on page.
//!
//! Both checks target unsophisticated bots that fill every input and post
//! immediately. The page script reports `elapsed_ms`, the time between page
//! load and submit, measured on the visitor's clock so server/client clock
//! skew doesn't matter.
//!
//! A plain HTML form post (no JavaScript) has no timing to report, so for
//! [`Origin::Browser`] only the honeypot and any timing that *is* present
//! are checked.

use crate::config::FormsConfig;
use std::collections::BTreeMap;
use std::fmt;

/// How a submission reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Posted by the page script, which always sends `elapsed_ms`.
    Script,
    /// A native form post from a browser without the script.
    Browser,
}

/// Outcome of inspecting a raw submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpamVerdict {
    Clean,
    /// The hidden honeypot input was filled in.
    Honeypot,
    /// Submitted sooner than the configured minimum after page load.
    TooFast { elapsed_ms: u64 },
    /// No usable `elapsed_ms`: the form was posted without the page script.
    MissingTiming,
}

impl SpamVerdict {
    pub fn is_spam(&self) -> bool {
        !matches!(self, SpamVerdict::Clean)
    }
}

impl fmt::Display for SpamVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpamVerdict::Clean => write!(f, "clean"),
            SpamVerdict::Honeypot => write!(f, "honeypot filled"),
            SpamVerdict::TooFast { elapsed_ms } => write!(f, "submitted after {elapsed_ms}ms"),
            SpamVerdict::MissingTiming => write!(f, "no elapsed time"),
        }
    }
}

/// Inspect raw form fields. The honeypot check runs first.
pub fn inspect(fields: &BTreeMap<String, String>, config: &FormsConfig, origin: Origin) -> SpamVerdict {
    let honeypot = fields
        .get(&config.honeypot_field)
        .map(|v| v.trim())
        .unwrap_or("");
    if !honeypot.is_empty() {
        return SpamVerdict::Honeypot;
    }
    let elapsed = fields
        .get("elapsed_ms")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0);
    match elapsed {
        None if origin == Origin::Browser => SpamVerdict::Clean,
        None => SpamVerdict::MissingTiming,
        Some(ms) if (ms as u64) < config.min_elapsed_ms => SpamVerdict::TooFast {
            elapsed_ms: ms as u64,
        },
        Some(_) => SpamVerdict::Clean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn clean_submission() {
        let f = fields(&[("website", ""), ("elapsed_ms", "8200")]);
        assert_eq!(inspect(&f, &FormsConfig::default(), Origin::Script), SpamVerdict::Clean);
    }

    #[test]
    fn honeypot_filled_is_spam() {
        let f = fields(&[("website", "http://spam.example"), ("elapsed_ms", "9000")]);
        assert_eq!(inspect(&f, &FormsConfig::default(), Origin::Script), SpamVerdict::Honeypot);
    }

    #[test]
    fn whitespace_honeypot_is_clean() {
        let f = fields(&[("website", "  "), ("elapsed_ms", "9000")]);
        assert!(!inspect(&f, &FormsConfig::default(), Origin::Script).is_spam());
    }

    #[test]
    fn too_fast_is_spam() {
        let f = fields(&[("elapsed_ms", "450")]);
        assert_eq!(
            inspect(&f, &FormsConfig::default(), Origin::Script),
            SpamVerdict::TooFast { elapsed_ms: 450 }
        );
    }

    #[test]
    fn exactly_minimum_is_clean() {
        let f = fields(&[("elapsed_ms", "3000")]);
        assert_eq!(inspect(&f, &FormsConfig::default(), Origin::Script), SpamVerdict::Clean);
    }

    #[test]
    fn fractional_elapsed_accepted() {
        let f = fields(&[("elapsed_ms", "3500.7")]);
        assert_eq!(inspect(&f, &FormsConfig::default(), Origin::Script), SpamVerdict::Clean);
    }

    #[test]
    fn missing_or_garbage_timing_is_spam() {
        let config = FormsConfig::default();
        assert_eq!(inspect(&fields(&[]), &config, Origin::Script), SpamVerdict::MissingTiming);
        assert_eq!(
            inspect(&fields(&[("elapsed_ms", "soon")]), &config, Origin::Script),
            SpamVerdict::MissingTiming
        );
        assert_eq!(
            inspect(&fields(&[("elapsed_ms", "-5")]), &config, Origin::Script),
            SpamVerdict::MissingTiming
        );
    }

    #[test]
    fn native_post_needs_no_timing() {
        let config = FormsConfig::default();
        assert_eq!(inspect(&fields(&[("website", "")]), &config, Origin::Browser), SpamVerdict::Clean);
        assert_eq!(
            inspect(&fields(&[("website", "buy now")]), &config, Origin::Browser),
            SpamVerdict::Honeypot
        );
        assert_eq!(
            inspect(&fields(&[("elapsed_ms", "20")]), &config, Origin::Browser),
            SpamVerdict::TooFast { elapsed_ms: 20 }
        );
    }

    #[test]
    fn custom_honeypot_name() {
        let config = FormsConfig {
            honeypot_field: "fax".into(),
            ..FormsConfig::default()
        };
        let f = fields(&[("website", "filled"), ("fax", ""), ("elapsed_ms", "5000")]);
        assert_eq!(inspect(&f, &config, Origin::Script), SpamVerdict::Clean);
    }
}
