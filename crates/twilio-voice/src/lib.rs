//! Twilio voice-call client library.
//!
//! This crate places outbound voice calls through the Twilio REST API. It
//! supports:
//!
//! - Direct text-to-speech calls and ephemeral conference calls
//! - Concurrent broadcast to many numbers with independent failures
//! - Status-callback URLs carrying each call's retry context, so the webhook
//!   that receives delivery statuses is stateless
//!
//! # Example
//!
//! ```no_run
//! use twilio_voice::{CallPlacer, OutboundCall, TwilioClient, VoiceConfig};
//!
//! # async fn example() -> Result<(), twilio_voice::VoiceError> {
//! let config = VoiceConfig::new(
//!     "ACXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
//!     "auth-token",
//!     "+15005550006",
//!     "https://alerts.example.com",
//! );
//! let client = TwilioClient::new(config)?;
//!
//! let call = OutboundCall::direct("+2348100000001", "New signal from FX Room: BUY EURUSD now");
//! let sid = client.place_call(&call).await?;
//! println!("placed call {}", sid);
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod placer;
pub mod twiml;
pub mod types;

pub use callback::RetryContext;
pub use client::TwilioClient;
pub use config::{Addressing, VoiceConfig, DEFAULT_API_BASE_URL};
pub use error::VoiceError;
pub use placer::{CallPlacer, PlacementResult};
pub use twiml::build_twiml;
pub use types::{CallMode, OutboundCall};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
