//! One-shot messages carried from a redirect to the next page view.
//!
//! Messages ride in a cookie named [`FLASH_COOKIE`]. The value is
//! `base64url(json) "." base64url(hmac_sha256(json))`, signed with the
//! application secret. A cookie that fails to decode or verify is ignored.

use crate::{AppError, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secure_search_core::{HttpRequest, SetCookie};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying pending messages
pub const FLASH_COOKIE: &str = "flash";

/// Most messages kept pending; older ones are dropped first so the cookie
/// stays well under browser size limits
pub const MAX_PENDING_MESSAGES: usize = 5;

/// How a message is styled on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    /// CSS category used by the page, as in `alert-error`
    pub fn category(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: Severity,
    pub message: String,
}

/// Queues user-visible messages for the next rendered page
pub trait Notifier {
    fn flash(&mut self, message: String, severity: Severity);

    /// Drain everything queued so far
    fn take(&mut self) -> Vec<FlashMessage>;
}

/// Cookie-backed [`Notifier`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashMessages {
    messages: Vec<FlashMessage>,
}

impl FlashMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages carried by the request's flash cookie, or none if the cookie
    /// is missing or does not verify
    pub fn from_request(request: &HttpRequest, secret: &[u8]) -> Self {
        let Some(value) = request.cookie(FLASH_COOKIE) else {
            return Self::new();
        };

        Self::decode(&value, secret).unwrap_or_else(|e| {
            debug!(error = %e, "ignoring flash cookie");
            Self::new()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    /// Encode to a signed cookie value
    pub fn encode(&self, secret: &[u8]) -> Result<String> {
        let json = serde_json::to_vec(&self.messages)?;
        let signature = sign(&json, secret)?.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&json),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Decode and verify a signed cookie value
    pub fn decode(value: &str, secret: &[u8]) -> Result<Self> {
        let (payload, signature) = value
            .split_once('.')
            .ok_or_else(|| AppError::Flash("missing signature".to_string()))?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AppError::Flash(e.to_string()))?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| AppError::Flash(e.to_string()))?;

        sign(&json, secret)?
            .verify_slice(&signature)
            .map_err(|_| AppError::Flash("signature mismatch".to_string()))?;

        let mut messages: Vec<FlashMessage> = serde_json::from_slice(&json)?;
        if messages.len() > MAX_PENDING_MESSAGES {
            messages.drain(..messages.len() - MAX_PENDING_MESSAGES);
        }
        Ok(Self { messages })
    }

    /// The `Set-Cookie` that carries these messages to the next request
    pub fn to_cookie(&self, secret: &[u8]) -> Result<SetCookie> {
        Ok(SetCookie::new(FLASH_COOKIE, self.encode(secret)?))
    }

    /// The `Set-Cookie` that clears pending messages
    pub fn clear_cookie() -> SetCookie {
        SetCookie::removal(FLASH_COOKIE)
    }
}

impl Notifier for FlashMessages {
    fn flash(&mut self, message: String, severity: Severity) {
        if self.messages.len() >= MAX_PENDING_MESSAGES {
            let excess = self.messages.len() + 1 - MAX_PENDING_MESSAGES;
            self.messages.drain(..excess);
        }
        self.messages.push(FlashMessage {
            category: severity,
            message,
        });
    }

    fn take(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.messages)
    }
}

fn sign(data: &[u8], secret: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Flash(format!("unusable signing key: {}", e)))?;
    mac.update(data);
    Ok(mac)
}
