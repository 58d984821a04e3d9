//! Notification emails for accepted form submissions.
//!
//! A validated [`Submission`] becomes an [`Email`] addressed to the sales
//! inbox picked by [`routing::inbox_for`](crate::forms::routing::inbox_for),
//! with a plain-text body and an HTML body listing the submitted fields.
//! Replying goes straight to the customer when they left an email address.
//!
//! Delivery goes through a [`Mailer`]:
//!
//! - [`ResendMailer`] posts to the Resend HTTP API.
//! - [`LogMailer`] only logs the email, for local development.

use crate::config::{MailConfig, MailTransport};
use crate::forms::Submission;
use maud::{DOCTYPE, html};
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// Environment variable holding the Resend API key.
pub const API_KEY_ENV: &str = "RESEND_API_KEY";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mail API rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("RESEND_API_KEY is not set")]
    MissingApiKey,
}

/// A composed notification email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Build the notification email for a submission.
pub fn compose(submission: &Submission, to: &str, from: &str, site_name: &str) -> Email {
    let subject = match submission.value("company") {
        Some(company) => format!(
            "[{site_name}] {}: {} ({company})",
            submission.kind.label(),
            submission.name()
        ),
        None => format!("[{site_name}] {}: {}", submission.kind.label(), submission.name()),
    };

    let country = submission.country.map(|c| c.label()).unwrap_or("Unknown");
    let mut text = format!("{}\n\n", submission.kind.label());
    for (spec, value) in &submission.fields {
        text.push_str(&format!("{}: {}\n", spec.label, value));
    }
    text.push_str(&format!(
        "\nPhone country: {country}\nSite language: {}\n",
        submission.locale.code()
    ));

    let body = html! {
        (DOCTYPE)
        html {
            body style="font-family: sans-serif" {
                h2 { (submission.kind.label()) }
                table cellpadding="6" style="border-collapse: collapse" {
                    @for (spec, value) in &submission.fields {
                        tr {
                            th align="left" valign="top" { (spec.label) }
                            td style="white-space: pre-wrap" { (value) }
                        }
                    }
                    tr {
                        th align="left" { "Phone country" }
                        td { (country) }
                    }
                    tr {
                        th align="left" { "Site language" }
                        td { (submission.locale.code()) }
                    }
                }
            }
        }
    };

    Email {
        from: from.to_string(),
        to: vec![to.to_string()],
        reply_to: submission.email().map(str::to_string),
        subject,
        html: body.into_string(),
        text,
    }
}

/// Delivers composed emails.
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: &Email) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Sends through the Resend API (`POST {api_base}/emails`).
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_base: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build from config, reading the API key from the environment.
    pub fn from_env(config: &MailConfig) -> Result<Self, MailError> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(MailError::MissingApiKey)?;
        Ok(Self::new(&config.api_base, &key))
    }

    pub fn endpoint(&self) -> String {
        format!("{}/emails", self.api_base)
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(to = ?email.to, subject = %email.subject, "email sent");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Logs emails instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        tracing::info!(
            to = ?email.to,
            reply_to = ?email.reply_to,
            subject = %email.subject,
            body = %email.text,
            "email not sent (log transport)"
        );
        Ok(())
    }
}

/// The transport selected by `mail.transport`.
#[derive(Debug, Clone)]
pub enum Transport {
    Resend(ResendMailer),
    Log(LogMailer),
}

impl Transport {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        Ok(match config.transport {
            MailTransport::Resend => Transport::Resend(ResendMailer::from_env(config)?),
            MailTransport::Log => Transport::Log(LogMailer),
        })
    }
}

impl Mailer for Transport {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        match self {
            Transport::Resend(m) => m.send(email).await,
            Transport::Log(m) => m.send(email).await,
        }
    }
}
