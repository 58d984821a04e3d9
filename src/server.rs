//! HTTP server: the three lead-form endpoints plus static hosting of `dist/`.
//!
//! ## Routes
//!
//! | Method | Path | |
//! |--------|------|-|
//! | POST | `/api/contact` | [`FormKind::Contact`] |
//! | POST | `/api/business-contact` | [`FormKind::Business`] |
//! | POST | `/api/leads/b2c` | [`FormKind::Lead`] |
//! | GET | `/api/health` | liveness |
//! | GET | everything else | files from the generated site, `404.html` fallback |
//!
//! ## Submission flow
//!
//! 1. The body is read as JSON, urlencoded or multipart into a flat field map.
//! 2. Spam check ([`spam::inspect`]). Spam gets the normal success response
//!    so bots learn nothing, and no email is sent.
//! 3. Validation ([`forms::validate`]). Failures return 422 with every bad
//!    field and a message in the visitor's language.
//! 4. Inbox routing by phone country, email composition, delivery.
//!    Delivery failure returns 502.
//!
//! ## Posts without JavaScript
//!
//! The page script posts JSON and reads JSON back. A browser posting the
//! form natively (urlencoded or multipart, not asking for JSON) gets pages
//! instead: a `303` to `/thanks/` in its language on success, and an HTML
//! error page listing the bad fields on 422 or 502. It carries no timing, so
//! only the honeypot guards it.

use crate::config::SiteConfig;
use crate::forms::spam::{self, Origin};
use crate::forms::{self, ErrorCode, FormKind, ValidationErrors, routing};
use crate::generate::THANKS_ROUTE;
use crate::i18n::{Locale, Translations, localized_path};
use crate::mail::{self, MailError, Mailer, Transport};
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Serialize;
use maud::{DOCTYPE, html};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Mail setup error: {0}")]
    Mail(#[from] MailError),
    #[error("Invalid bind address '{0}'")]
    BindAddress(String),
}

/// Shared state for the form handlers.
pub struct AppState<M> {
    pub config: SiteConfig,
    pub translations: Translations,
    pub mailer: M,
}

/// Build the router. Static hosting is enabled when `site_dir` is given.
pub fn build_router<M: Mailer>(state: Arc<AppState<M>>, site_dir: Option<&Path>) -> Router {
    let body_limit = state.config.server.max_body_bytes;
    let router = Router::new()
        .route("/api/health", get(health))
        .route(FormKind::Contact.endpoint(), post(contact::<M>))
        .route(FormKind::Business.endpoint(), post(business_contact::<M>))
        .route(FormKind::Lead.endpoint(), post(b2c_lead::<M>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let router = match site_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("404.html"))),
        ),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Run the server until the process is stopped.
pub async fn serve(
    config: SiteConfig,
    translations: Translations,
    bind: &str,
    site_dir: Option<PathBuf>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| ServerError::BindAddress(bind.to_string()))?;
    let mailer = Transport::from_config(&config.mail)?;
    tracing::info!(transport = ?config.mail.transport, "mail transport ready");

    let state = Arc::new(AppState {
        config,
        translations,
        mailer,
    });
    let app = build_router(state, site_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, site = ?site_dir, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn contact<M: Mailer>(
    State(state): State<Arc<AppState<M>>>,
    payload: FormPayload,
) -> Response {
    handle_submission(FormKind::Contact, &state, payload).await
}

async fn business_contact<M: Mailer>(
    State(state): State<Arc<AppState<M>>>,
    payload: FormPayload,
) -> Response {
    handle_submission(FormKind::Business, &state, payload).await
}

async fn b2c_lead<M: Mailer>(
    State(state): State<Arc<AppState<M>>>,
    payload: FormPayload,
) -> Response {
    handle_submission(FormKind::Lead, &state, payload).await
}

async fn handle_submission<M: Mailer>(
    kind: FormKind,
    state: &AppState<M>,
    payload: FormPayload,
) -> Response {
    let FormPayload { fields: raw, origin } = payload;
    let locale = forms::submission_locale(&raw);
    let reply = Reply {
        origin,
        locale,
        t: &state.translations,
    };

    let verdict = spam::inspect(&raw, &state.config.forms, origin);
    if verdict.is_spam() {
        tracing::warn!(form = %kind, reason = %verdict, "spam submission dropped");
        return reply.accepted();
    }

    let submission = match forms::validate(kind, &raw, &state.config.forms) {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::info!(form = %kind, fields = ?errors.0.keys().collect::<Vec<_>>(), "submission rejected");
            return reply.invalid(kind, &errors);
        }
    };

    let inbox = routing::inbox_for(kind, submission.country, &state.config.mail);
    let email = mail::compose(
        &submission,
        inbox,
        &state.config.mail.from,
        &state.config.site_name,
    );
    match state.mailer.send(&email).await {
        Ok(()) => {
            tracing::info!(form = %kind, country = ?submission.country, inbox, "lead delivered");
            reply.accepted()
        }
        Err(err) => {
            tracing::error!(form = %kind, inbox, error = %err, "lead delivery failed");
            reply.delivery_failed(kind)
        }
    }
}

#[derive(Serialize)]
struct FieldError {
    code: ErrorCode,
    message: String,
}

/// Builds responses in the shape the client expects: JSON for the page
/// script, pages for a native form post.
struct Reply<'a> {
    origin: Origin,
    locale: Locale,
    t: &'a Translations,
}

impl Reply<'_> {
    fn accepted(&self) -> Response {
        match self.origin {
            Origin::Script => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
            Origin::Browser => Redirect::to(&localized_path(THANKS_ROUTE, self.locale)).into_response(),
        }
    }

    fn invalid(&self, kind: FormKind, errors: &ValidationErrors) -> Response {
        let fields: BTreeMap<&str, FieldError> = errors
            .0
            .iter()
            .map(|(field, code)| {
                let message = self.t.get(self.locale, &code.message_key()).to_string();
                (*field, FieldError { code: *code, message })
            })
            .collect();
        let message = self.t.get(self.locale, "form.invalid");
        match self.origin {
            Origin::Script => {
                let body = json!({ "ok": false, "errors": fields, "message": message });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            Origin::Browser => {
                let lines: Vec<String> = fields
                    .iter()
                    .map(|(field, error)| {
                        let label = self.t.get(self.locale, &format!("form.{field}")).to_string();
                        format!("{label}: {}", error.message)
                    })
                    .collect();
                self.page(StatusCode::UNPROCESSABLE_ENTITY, message, &lines, kind)
            }
        }
    }

    fn delivery_failed(&self, kind: FormKind) -> Response {
        let message = self.t.get(self.locale, "form.delivery_failed");
        match self.origin {
            Origin::Script => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "ok": false, "error": "delivery_failed", "message": message })),
            )
                .into_response(),
            Origin::Browser => self.page(StatusCode::BAD_GATEWAY, message, &[], kind),
        }
    }

    /// Minimal standalone page with a link back to the form.
    fn page(&self, status: StatusCode, heading: &str, lines: &[String], kind: FormKind) -> Response {
        let markup = html! {
            (DOCTYPE)
            html lang=(self.locale.code()) dir=(self.locale.dir()) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (heading) }
                }
                body {
                    h1 { (heading) }
                    @if !lines.is_empty() {
                        ul {
                            @for line in lines {
                                li { (line) }
                            }
                        }
                    }
                    p {
                        a href=(localized_path(kind.page_route(), self.locale)) {
                            (self.t.get(self.locale, "form.back"))
                        }
                    }
                }
            }
        };
        (status, Html(markup.into_string())).into_response()
    }
}

/// A form body as a flat `name → value` map, whatever the content type.
///
/// JSON objects keep string, number and boolean values (numbers such as
/// `elapsed_ms` are stringified); nested values are ignored. Multipart file
/// parts are skipped.
///
/// JSON bodies, and form bodies sent with `Accept: application/json`, come
/// from the page script. Other form bodies are native browser posts.
pub struct FormPayload {
    pub fields: BTreeMap<String, String>,
    pub origin: Origin,
}

/// Why a form body could not be read.
#[derive(Error, Debug)]
pub enum PayloadRejection {
    #[error("malformed request body: {0}")]
    Malformed(String),
    #[error("request body too large")]
    TooLarge,
    #[error("unsupported content type")]
    UnsupportedMediaType,
}

impl PayloadRejection {
    /// Map an axum extractor rejection. Only the body limit keeps its own status.
    fn from_rejection(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            PayloadRejection::TooLarge
        } else {
            PayloadRejection::Malformed(text)
        }
    }
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        let status = match self {
            PayloadRejection::Malformed(_) => StatusCode::BAD_REQUEST,
            PayloadRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            PayloadRejection::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        };
        let body = json!({ "ok": false, "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        let wants_json = req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let form_origin = if wants_json { Origin::Script } else { Origin::Browser };

        if content_type.starts_with("application/json") {
            let Json(map) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| PayloadRejection::from_rejection(e.status(), e.body_text()))?;
            Ok(FormPayload {
                fields: flatten_json(map),
                origin: Origin::Script,
            })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(map) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| PayloadRejection::from_rejection(e.status(), e.body_text()))?;
            Ok(FormPayload {
                fields: map,
                origin: form_origin,
            })
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| PayloadRejection::from_rejection(e.status(), e.body_text()))?;
            let fields = read_multipart(multipart).await?;
            Ok(FormPayload {
                fields,
                origin: form_origin,
            })
        } else {
            Err(PayloadRejection::UnsupportedMediaType)
        }
    }
}

fn flatten_json(map: serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key, text))
        })
        .collect()
}

async fn read_multipart(mut multipart: Multipart) -> Result<BTreeMap<String, String>, PayloadRejection> {
    let mut fields = BTreeMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PayloadRejection::from_rejection(e.status(), e.body_text()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| PayloadRejection::from_rejection(e.status(), e.body_text()))?;
        fields.insert(name, value);
    }
    Ok(fields)
}
