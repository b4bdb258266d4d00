//! Signal classification and call-dispatch pipeline for Klaxon.
//!
//! The chat-ingestion collaborator hands this crate already-parsed group
//! messages. For each one, the pipeline:
//!
//! 1. Gates on the signal classifier (no keyword, no work).
//! 2. Resolves the group's currently-eligible subscribers, creating the group
//!    on first sight.
//! 3. Broadcasts one voice call per eligible number through a [`CallPlacer`].
//! 4. Logs exactly one call attempt per eligible subscription, whatever the
//!    placement outcome was.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use database::Database;
//! use dispatcher::{DispatchMode, Dispatcher, InboundMessage};
//! use twilio_voice::{TwilioClient, VoiceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:klaxon.db?mode=rwc").await?;
//! let config = VoiceConfig::new("AC...", "token", "+15005550006", "https://alerts.example.com");
//! let client = TwilioClient::new(config)?;
//! let dispatcher = Dispatcher::new(db, client, DispatchMode::Direct);
//!
//! let message = InboundMessage {
//!     group_external_id: "-1001234567890".to_string(),
//!     group_display_name: "FX Room".to_string(),
//!     text: "BUY EURUSD now".to_string(),
//! };
//! let outcome = dispatcher.handle_signal(&message, Utc::now().time()).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod error;
pub mod resolver;

pub use error::DispatchError;
pub use resolver::{EligibleSubscriber, Resolution};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use database::{call_attempt, Database};
use twilio_voice::{CallMode, CallPlacer};

/// An already-parsed group message from the chat-ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Chat-platform group id.
    pub group_external_id: String,
    /// Group display name, used in the announcement and as the room name.
    pub group_display_name: String,
    /// Raw message text.
    pub text: String,
}

/// How dispatched calls are placed. A deployment-level choice, never
/// per-message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Speak the announcement to each subscriber directly.
    Direct,
    /// Join subscribers into a conference room named after the group.
    Conference,
}

/// Outcome of processing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The message carried no trading signal.
    NotSignal,
    /// Signal detected, but no subscriber was eligible right now.
    NoneEligible,
    /// Calls were fanned out and attempts logged.
    Dispatched {
        /// Attempt rows written, one per eligible subscription.
        attempts: usize,
        /// How many of those placements the provider accepted.
        placed: usize,
    },
}

/// The dispatch orchestrator: classifier, resolver, and gateway glued to the
/// attempt log.
pub struct Dispatcher<P: CallPlacer> {
    db: Database,
    placer: P,
    mode: DispatchMode,
}

impl<P: CallPlacer> Dispatcher<P> {
    /// Create a dispatcher.
    pub fn new(db: Database, placer: P, mode: DispatchMode) -> Self {
        Self { db, placer, mode }
    }

    /// Get the dispatch mode.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Process one inbound group message at the given UTC wall-clock time.
    ///
    /// Guarantee: exactly one call attempt row per eligible subscription per
    /// signal, with a non-empty detail (the call SID, or "failed"), regardless
    /// of how placement went. Persistence failures abort the dispatch before
    /// any placement happens.
    pub async fn handle_signal(
        &self,
        message: &InboundMessage,
        now: NaiveTime,
    ) -> Result<DispatchOutcome, DispatchError> {
        if !classifier::is_signal(&message.text) {
            debug!("Message did not contain a signal keyword");
            return Ok(DispatchOutcome::NotSignal);
        }
        info!(group = %message.group_display_name, "Signal detected");

        let resolution = resolver::resolve(
            &self.db,
            &message.group_external_id,
            &message.group_display_name,
            now,
        )
        .await?;

        if resolution.eligible.is_empty() {
            info!(group = %resolution.group.name, "No eligible subscribers for signal");
            return Ok(DispatchOutcome::NoneEligible);
        }

        let announcement = format!("New signal from {}: {}", resolution.group.name, message.text);
        let mode = match self.mode {
            DispatchMode::Direct => CallMode::Direct,
            DispatchMode::Conference => CallMode::Conference {
                room: resolution.group.name.clone(),
            },
        };

        let phones: Vec<String> = resolution
            .eligible
            .iter()
            .map(|e| e.phone_number.clone())
            .collect();
        let results = self.placer.broadcast(&phones, &announcement, &mode).await;

        let mut placed = 0;
        for subscriber in &resolution.eligible {
            let detail = match results.get(&subscriber.phone_number) {
                Some(Ok(sid)) => {
                    placed += 1;
                    sid.clone()
                }
                _ => "failed".to_string(),
            };
            call_attempt::create_call_attempt(
                self.db.pool(),
                subscriber.subscription_id,
                "initiated",
                &detail,
            )
            .await?;
        }

        info!(
            attempts = resolution.eligible.len(),
            placed, "Dispatch complete"
        );

        Ok(DispatchOutcome::Dispatched {
            attempts: resolution.eligible.len(),
            placed,
        })
    }
}
