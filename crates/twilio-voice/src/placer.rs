//! The call-placement seam.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

use crate::error::VoiceError;
use crate::types::{CallMode, OutboundCall};

/// Outcome of one placement within a broadcast: the call SID, or the error
/// that kept the call from reaching the provider.
pub type PlacementResult = Result<String, VoiceError>;

/// Something that can place outbound voice calls.
///
/// The dispatch pipeline and the status webhook both talk to the provider
/// through this trait, so tests can substitute an in-memory placer.
#[async_trait]
pub trait CallPlacer: Send + Sync {
    /// Place one outbound call. Returns the provider call SID.
    ///
    /// A placement failure is terminal for this attempt: no callback will ever
    /// arrive for a call the provider never accepted, so the caller must not
    /// expect the retry path to recover it.
    async fn place_call(&self, call: &OutboundCall) -> Result<String, VoiceError>;

    /// Place one call per phone number, independently and concurrently.
    ///
    /// One number's failure never aborts placement for the others. The result
    /// map preserves every input number as a key.
    async fn broadcast(
        &self,
        phones: &[String],
        message: &str,
        mode: &CallMode,
    ) -> HashMap<String, PlacementResult> {
        let placements = phones.iter().map(|phone| {
            let call = OutboundCall {
                to: phone.clone(),
                message: message.to_string(),
                retry_count: 0,
                mode: mode.clone(),
            };
            async move {
                let result = self.place_call(&call).await;
                if let Err(e) = &result {
                    warn!(to = %call.to, error = %e, "Call placement failed");
                }
                (call.to, result)
            }
        });

        join_all(placements).await.into_iter().collect()
    }
}
