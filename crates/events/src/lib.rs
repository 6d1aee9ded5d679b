//! Domain events emitted by the inventory session.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
