use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerId;
use crate::types::ReconnectionTimings;

/// Phase of a reconnection session.
///
/// Active phases own the per-second clock (and, while probing, the probe cadence);
/// terminal phases own no clock, so a finished session cannot keep ticking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReconnectionPhase {
    Settling { clock: TimerId },
    Probing { clock: TimerId, cadence: TimerId },
    /// Device answered; `dismiss` fires when the success indicator has been shown long enough
    Succeeded { dismiss: TimerId },
    Failed,
}

impl ReconnectionPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Settling { .. } | Self::Probing { .. })
    }

    pub fn clock(&self) -> Option<TimerId> {
        match self {
            Self::Settling { clock } | Self::Probing { clock, .. } => Some(*clock),
            _ => None,
        }
    }

    pub fn cadence(&self) -> Option<TimerId> {
        match self {
            Self::Probing { cadence, .. } => Some(*cadence),
            _ => None,
        }
    }

    /// Every timer handle this phase still holds
    pub fn live_timers(&self) -> Vec<TimerId> {
        match self {
            Self::Settling { clock } => vec![*clock],
            Self::Probing { clock, cadence } => vec![*clock, *cadence],
            Self::Succeeded { dismiss } => vec![*dismiss],
            Self::Failed => vec![],
        }
    }
}

/// State of one in-flight reboot
///
/// `timings` is captured when the session starts; later `ConfigureTimings` events only
/// affect the next session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectionSession {
    pub id: u64,
    pub elapsed_secs: u32,
    pub phase: ReconnectionPhase,
    pub timings: ReconnectionTimings,
}

/// State of the save → reboot → reconnect flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DeviceOperationState {
    #[default]
    Idle,
    /// Save succeeded; the reboot call goes out when `timer` fires
    RebootScheduled { timer: TimerId },
    /// Reboot call in flight
    Rebooting,
    Reconnecting(ReconnectionSession),
}

impl DeviceOperationState {
    pub fn session(&self) -> Option<&ReconnectionSession> {
        match self {
            Self::Reconnecting(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut ReconnectionSession> {
        match self {
            Self::Reconnecting(session) => Some(session),
            _ => None,
        }
    }

    /// Every timer handle owned by the flow
    pub fn live_timers(&self) -> Vec<TimerId> {
        match self {
            Self::RebootScheduled { timer } => vec![*timer],
            Self::Reconnecting(session) => session.phase.live_timers(),
            Self::Idle | Self::Rebooting => vec![],
        }
    }
}
