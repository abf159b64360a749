//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - section: Configuration sections of the radio
//! - change: Change requests, form input and the pending confirmation
//! - device: Reboot and reconnection state
//! - timings: Durations driving the reboot flow
//! - responses: Wire types returned by the device service
//! - common: Toasts and the overlay spinner

pub mod change;
pub mod common;
pub mod device;
pub mod responses;
pub mod section;
pub mod timings;

pub use change::*;
pub use common::*;
pub use device::*;
pub use responses::*;
pub use section::*;
pub use timings::*;
