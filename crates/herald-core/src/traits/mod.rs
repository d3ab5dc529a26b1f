//! Collaborator traits (ports)
//!
//! The domain states what it needs from the chat platform and from the
//! clock; the gateway crate and the test fixtures provide implementations.

mod clock;
mod platform;

pub use clock::{Clock, SystemClock};
pub use platform::ChatPlatform;
