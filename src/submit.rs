//! Form submission pipeline: validate, POST, fall back to mail.
//!
//! ```text
//! validate ──invalid──▶ Rejected (fields flagged, nothing sent)
//!    │
//!  valid
//!    ▼
//! payload (+ carried service) ──▶ POST JSON ──2xx──▶ Sent (form reset)
//!                                    │
//!                          non-2xx / transport error
//!                                    ▼
//!                       mailto: composer ──▶ FellBack (form kept)
//! ```
//!
//! The network and the mail client sit behind the [`SubmitTransport`] and
//! [`MailComposer`] traits so tests can replace both.
//!
//! Submissions are not serialized: two concurrent calls for the same form
//! both reach the endpoint. There is no in-flight guard or debounce.

use crate::config::SiteConfig;
use crate::form::{Form, FormKind, Payload};
use crate::mailto;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Other(String),
}

/// Sends a payload somewhere and reports the HTTP status it got back.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn post_json(&self, payload: &Payload) -> Result<u16, TransportError>;
}

/// Hands a `mailto:` target to whatever composes mail. Fire-and-forget.
pub trait MailComposer: Send + Sync {
    fn compose(&self, mailto: &str);
}

/// Timeout and retry policy for the remote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first failure.
    pub retries: u32,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retries: 0,
        }
    }
}

impl SubmitPolicy {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            timeout: config.submission.timeout(),
            retries: config.submission.retries,
        }
    }
}

/// POSTs JSON to a fixed endpoint with `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// The client carries no timeout of its own; the pipeline bounds each
    /// attempt with its policy, so an expired attempt is reported as a timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post_json(&self, payload: &Payload) -> Result<u16, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, fields = payload.len(), "posting form");
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

/// Leaves the mail target for the caller to show; only logs it.
pub struct LogComposer;

impl MailComposer for LogComposer {
    fn compose(&self, mailto: &str) {
        tracing::info!(%mailto, "mail fallback ready");
    }
}

/// Opens the mail target with the platform's URL handler.
pub struct SystemComposer;

impl MailComposer for SystemComposer {
    fn compose(&self, mailto: &str) {
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "explorer"
        } else {
            "xdg-open"
        };
        if let Err(e) = std::process::Command::new(opener).arg(mailto).spawn() {
            tracing::warn!("could not launch {opener} for {mailto}: {e}");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The request never completed.
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected {
        flagged: Vec<String>,
        message: String,
    },
    /// The endpoint accepted the submission and the form was reset.
    Sent { message: String },
    /// The remote attempt failed and a mail message was composed instead.
    FellBack {
        reason: FallbackReason,
        mailto: String,
        message: String,
    },
}

impl SubmitOutcome {
    /// Text shown in the form's inline result area.
    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Rejected { message, .. }
            | SubmitOutcome::Sent { message }
            | SubmitOutcome::FellBack { message, .. } => message,
        }
    }
}

/// Inline messages for one form.
pub struct Messages {
    pub invalid: &'static str,
    pub pending: &'static str,
    pub success: &'static str,
}

pub fn messages(kind: FormKind) -> Messages {
    match kind {
        FormKind::Enquiry => Messages {
            invalid: "Please correct the highlighted fields.",
            pending: "Submitting...",
            success: "Thanks — your enquiry was submitted. We will respond within 1 business day.",
        },
        FormKind::Contact => Messages {
            invalid: "Please fix the form errors.",
            pending: "Sending...",
            success: "Message sent — thank you.",
        },
    }
}

/// Message shown after the mail fallback, naming the backup address.
pub fn fallback_message(kind: FormKind, reason: &FallbackReason, contact: &str) -> String {
    let lead = match (kind, reason) {
        (FormKind::Enquiry, FallbackReason::Status(_)) => {
            "Could not submit via server. A mail client should open to send the enquiry."
        }
        (FormKind::Enquiry, FallbackReason::Transport(_)) => {
            "An email client should open so you can send the enquiry."
        }
        (FormKind::Contact, FallbackReason::Status(_)) => {
            "Could not send via server. A mail client should open instead."
        }
        (FormKind::Contact, FallbackReason::Transport(_)) => {
            "A mail client should open so you can send the message."
        }
    };
    format!("{lead} If not, email {contact}")
}

pub struct SubmissionPipeline<T, M> {
    transport: T,
    composer: M,
    contact_email: String,
    policy: SubmitPolicy,
}

impl<T: SubmitTransport, M: MailComposer> SubmissionPipeline<T, M> {
    pub fn new(transport: T, composer: M, contact_email: impl Into<String>, policy: SubmitPolicy) -> Self {
        Self {
            transport,
            composer,
            contact_email: contact_email.into(),
            policy,
        }
    }

    /// Run one submission of `form`.
    ///
    /// `fragment` is the page's fragment identifier; forms that carry a
    /// service read `service=<name>` from it.
    pub async fn submit(&self, form: &mut Form, fragment: Option<&str>) -> SubmitOutcome {
        let msgs = messages(form.kind);
        if !form.validate() {
            let flagged: Vec<String> = form.flagged().iter().map(|s| s.to_string()).collect();
            tracing::info!(form = form.kind.id(), ?flagged, "validation failed");
            return SubmitOutcome::Rejected {
                flagged,
                message: msgs.invalid.to_string(),
            };
        }

        let carried = fragment.and_then(crate::fragment::carried_service);
        let payload = form.payload(carried.as_deref());
        tracing::info!(form = form.kind.id(), "{}", msgs.pending);

        match self.attempt(&payload).await {
            Ok(()) => {
                form.reset();
                SubmitOutcome::Sent {
                    message: msgs.success.to_string(),
                }
            }
            Err(reason) => {
                let mailto = mailto::mailto_url(&self.contact_email, &payload);
                tracing::warn!(form = form.kind.id(), ?reason, "remote submission failed, composing mail");
                self.composer.compose(&mailto);
                SubmitOutcome::FellBack {
                    message: fallback_message(form.kind, &reason, &self.contact_email),
                    reason,
                    mailto,
                }
            }
        }
    }

    /// POST with the policy's timeout and retry budget. The last failure wins.
    async fn attempt(&self, payload: &Payload) -> Result<(), FallbackReason> {
        let attempts = self.policy.retries.saturating_add(1);
        let mut last = FallbackReason::Transport("no attempt made".to_string());
        for n in 1..=attempts {
            let result = tokio::time::timeout(self.policy.timeout, self.transport.post_json(payload)).await;
            last = match result {
                Ok(Ok(status)) if (200..300).contains(&status) => return Ok(()),
                Ok(Ok(status)) => FallbackReason::Status(status),
                Ok(Err(e)) => FallbackReason::Transport(e.to_string()),
                Err(_) => FallbackReason::Transport(format!(
                    "timed out after {}s",
                    self.policy.timeout.as_secs_f64()
                )),
            };
            if n < attempts {
                tracing::debug!(attempt = n, ?last, "retrying submission");
            }
        }
        Err(last)
    }
}
