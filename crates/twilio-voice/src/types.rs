//! Types for placing outbound voice calls.

/// Placement mode for an outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallMode {
    /// Speak the message to the callee via text-to-speech, then hang up.
    Direct,
    /// Join the callee into a named, ephemeral conference room.
    Conference {
        /// Room name, derived from the group's display name.
        room: String,
    },
}

impl CallMode {
    /// The conference room name, if this is a conference call.
    pub fn conference_room(&self) -> Option<&str> {
        match self {
            CallMode::Direct => None,
            CallMode::Conference { room } => Some(room),
        }
    }
}

/// One outbound voice call to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    /// Destination phone number, E.164.
    pub to: String,
    /// Announcement text spoken on direct calls and carried for retries.
    pub message: String,
    /// How many placements preceded this one for the same alert.
    pub retry_count: u32,
    /// Direct or conference placement.
    pub mode: CallMode,
}

impl OutboundCall {
    /// Create a direct text-to-speech call.
    pub fn direct(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            retry_count: 0,
            mode: CallMode::Direct,
        }
    }

    /// Create a conference call joining the named room.
    pub fn conference(
        to: impl Into<String>,
        message: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            message: message.into(),
            retry_count: 0,
            mode: CallMode::Conference { room: room.into() },
        }
    }

    /// Set the retry counter carried on the status callback.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }
}
