use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerId;
use crate::types::*;

/// Configuration view and change submission events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    OpenView,
    CloseView,
    Load,
    SubmitForm {
        form: ConfigForm,
    },
    Confirm,
    Cancel,

    #[serde(skip)]
    LoadResponse(Result<String, String>),
    #[serde(skip)]
    SaveResponse(Result<SaveResponse, String>),
}

/// Reboot and reconnection events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Reboot,
    DismissReconnection,

    #[serde(skip)]
    RebootResponse(Result<RebootResponse, String>),

    // Timer callbacks carry the handle they were started with
    #[serde(skip)]
    RebootDelayElapsed { timer: TimerId },
    #[serde(skip)]
    ClockTick { timer: TimerId },
    #[serde(skip)]
    ProbeTick { timer: TimerId },
    #[serde(skip)]
    SuccessDisplayElapsed { timer: TimerId },
    #[serde(skip)]
    TimerCleared { timer: TimerId },

    #[serde(skip)]
    ProbeResponse {
        session: u64,
        sent_at: u32,
        healthy: bool,
    },
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    DismissToast { id: u64 },
    ClearToasts,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize,
    ConfigureTimings(ReconnectionTimings),
    /// Page is being left; every running timer is cleared
    Shutdown,

    Config(ConfigEvent),
    Device(DeviceEvent),
    Ui(UiEvent),
}
