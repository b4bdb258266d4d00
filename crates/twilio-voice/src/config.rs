//! Configuration types for twilio-voice.

use crate::callback::RetryContext;

/// Default Twilio REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// How outbound call destinations are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// Dial the E.164 number directly.
    Direct,
    /// Dial through a SIP domain, producing `sip:NUMBER@DOMAIN`.
    Sip { domain: String },
}

/// Configuration for the Twilio voice client.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Twilio REST API base URL (e.g., "https://api.twilio.com").
    pub api_base_url: String,
    /// Twilio account SID.
    pub account_sid: String,
    /// Twilio auth token.
    pub auth_token: String,
    /// Caller id presented to callees, E.164.
    pub caller_id: String,
    /// Public base URL of our webhook service (e.g., "https://alerts.example.com").
    pub callback_base_url: String,
    /// Destination addressing scheme.
    pub addressing: Addressing,
}

impl VoiceConfig {
    /// Create a new configuration with direct E.164 addressing.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        caller_id: impl Into<String>,
        callback_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            caller_id: caller_id.into(),
            callback_base_url: callback_base_url.into(),
            addressing: Addressing::Direct,
        }
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Address destinations through a SIP domain instead of dialing directly.
    pub fn with_sip_domain(mut self, domain: impl Into<String>) -> Self {
        self.addressing = Addressing::Sip {
            domain: domain.into(),
        };
        self
    }

    /// Get the call-creation endpoint URL.
    pub fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base_url, self.account_sid
        )
    }

    /// Build the status-callback URL carrying the retry context for one call.
    pub fn status_callback_url(&self, ctx: &RetryContext) -> String {
        format!("{}/twilio/webhook?{}", self.callback_base_url, ctx.to_query())
    }

    /// Render a destination phone number under the configured addressing scheme.
    pub fn destination(&self, number: &str) -> String {
        match &self.addressing {
            Addressing::Direct => number.to_string(),
            Addressing::Sip { domain } => format!("sip:{}@{}", number, domain),
        }
    }
}
