use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Durations of the save → reboot → reconnect flow.
///
/// The overall deadline of a reconnection session is `settle_secs + probing_secs`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconnectionTimings {
    /// Seconds to wait after the reboot call before probing
    #[validate(minimum = 1)]
    pub settle_secs: u32,
    /// Seconds of probing before the session fails
    #[validate(minimum = 1)]
    pub probing_secs: u32,
    #[validate(minimum = 1)]
    pub probe_interval_secs: u32,
    /// Probes answering later than this are treated as failed
    #[validate(minimum = 1)]
    pub probe_timeout_secs: u32,
    pub success_display_secs: u32,
    /// Delay between the "saved" toast and the reboot call
    pub reboot_delay_ms: u32,
}

impl Default for ReconnectionTimings {
    fn default() -> Self {
        Self {
            settle_secs: 15,
            probing_secs: 60,
            probe_interval_secs: 2,
            probe_timeout_secs: 5,
            success_display_secs: 2,
            reboot_delay_ms: 1500,
        }
    }
}

impl ReconnectionTimings {
    pub fn deadline_secs(&self) -> u32 {
        self.settle_secs.saturating_add(self.probing_secs)
    }
}
