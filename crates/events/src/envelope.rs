use serde::{Deserialize, Serialize};

use dioca_core::SessionId;

/// Envelope for an applied event, carrying session + ordering metadata.
///
/// `sequence_number` is monotonically increasing per session and equals the
/// session version right after the payload was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    session_id: SessionId,

    /// Position of this event in the session stream (1-based).
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(session_id: SessionId, sequence_number: u64, payload: E) -> Self {
        Self {
            session_id,
            sequence_number,
            payload,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
