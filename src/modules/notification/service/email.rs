use async_trait::async_trait;
use serde_json::json;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use super::{types, Error, Notification, Result};
use crate::modules::auth::service::otp::CODE_VALIDITY_MINUTES;

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone, Debug)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<()>;
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    sender: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: String, sender: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            sender,
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: Email) -> Result<()> {
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.sender,
                "to": email.to,
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to send email: {}", err);
                Error::NotSent
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Email provider rejected message ({}): {}", status, body);
            return Err(Error::NotSent);
        }

        Ok(())
    }
}

/// Keeps every message in memory instead of delivering it.
#[derive(Clone, Default)]
pub struct Outbox {
    sent: Arc<Mutex<Vec<Email>>>,
    failing: Arc<AtomicBool>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_to(&self, to: &str) -> Option<Email> {
        self.sent().into_iter().rev().find(|email| email.to == to)
    }

    /// Makes every following send fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, email: Email) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            tracing::error!("Failed to send email to {}: outbox is failing", email.to);
            return Err(Error::NotSent);
        }

        tracing::info!("Email to {}: {}", email.to, email.subject);
        tracing::debug!("{}", email.html);
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
        Ok(())
    }
}

fn render_verification_code_requested(notification: types::VerificationCodeRequested) -> Email {
    Email {
        to: notification.email,
        subject: String::from("Your Verification Code"),
        html: format!(
            "<h1>Your Verification Code</h1>\
             <p>Your verification code is: <strong>{}</strong></p>\
             <p>This code will expire in {} minutes.</p>",
            notification.code, CODE_VALIDITY_MINUTES
        ),
    }
}

pub fn render(notification: Notification) -> Email {
    match notification {
        Notification::VerificationCodeRequested(n) => render_verification_code_requested(n),
    }
}

pub async fn send(mailer: Arc<dyn Mailer>, notification: Notification) -> Result<()> {
    mailer.send(render(notification)).await
}
