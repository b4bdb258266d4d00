//! Twilio voice REST client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::callback::RetryContext;
use crate::config::VoiceConfig;
use crate::error::VoiceError;
use crate::placer::CallPlacer;
use crate::twiml;
use crate::types::OutboundCall;

/// Lifecycle events subscribed on every call's status callback.
const STATUS_CALLBACK_EVENTS: [&str; 4] = ["initiated", "ringing", "answered", "completed"];

/// A call resource as returned by the Twilio API. Only the SID is of interest.
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
}

/// Client for placing voice calls through the Twilio REST API.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    config: VoiceConfig,
}

impl TwilioClient {
    /// Create a client from a configuration.
    pub fn new(config: VoiceConfig) -> Result<Self, VoiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(VoiceError::Http)?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl CallPlacer for TwilioClient {
    async fn place_call(&self, call: &OutboundCall) -> Result<String, VoiceError> {
        let ctx = RetryContext::from_call(call);
        let status_callback = self.config.status_callback_url(&ctx);
        let twiml = twiml::build_twiml(&call.mode, &call.message);
        let to = self.config.destination(&call.to);

        let mut params: Vec<(&str, String)> = vec![
            ("To", to),
            ("From", self.config.caller_id.clone()),
            ("Twiml", twiml),
            ("StatusCallback", status_callback),
            ("StatusCallbackMethod", "POST".to_string()),
        ];
        for event in STATUS_CALLBACK_EVENTS {
            params.push(("StatusCallbackEvent", event.to_string()));
        }

        debug!(to = %call.to, retry_count = call.retry_count, "Placing call");

        let response = self
            .http
            .post(self.config.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(VoiceError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(to = %call.to, status = status.as_u16(), "Call placement rejected");
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let resource: CallResource = response.json().await.map_err(VoiceError::Http)?;
        debug!(to = %call.to, sid = %resource.sid, "Call placed");

        Ok(resource.sid)
    }
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("account_sid", &self.config.account_sid)
            .field("caller_id", &self.config.caller_id)
            .finish()
    }
}
