use serde::{Deserialize, Serialize};

use crate::commands::timer::TimerId;
use crate::types::*;

/// Trait for types that can handle error messages
///
/// This allows HTTP helper functions to work with Model without directly depending on it.
pub trait ModelErrorHandler {
    fn set_error(&mut self, error: String);
}

/// Application Model - the complete state
/// Also serves as the ViewModel when serialized (handle counters are excluded)
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct Model {
    // Configuration view state
    pub config_view_open: bool,
    /// Raw `GET /api/config` document, rendered by the shell
    pub device_config: Option<String>,
    /// Bumped on every successful load so the shell re-renders the forms
    pub config_revision: u32,

    // Confirmation gate: at most one change awaits the operator
    pub pending_change: Option<PendingChange>,

    // Save request in flight
    pub is_loading: bool,

    // Reboot and reconnection
    pub device_operation_state: DeviceOperationState,
    pub timings: ReconnectionTimings,

    // UI state
    pub overlay_spinner: OverlaySpinnerState,
    pub toasts: Vec<Toast>,

    #[serde(skip)]
    pub(crate) next_toast_id: u64,
    #[serde(skip)]
    pub(crate) next_timer_id: u64,
    #[serde(skip)]
    pub(crate) next_session_id: u64,
}

impl Model {
    /// Start a loading operation
    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    /// Push a toast for the shell to display
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.next_toast_id += 1;
        let toast = Toast {
            id: self.next_toast_id,
            message: message.into(),
            severity,
        };
        log::debug!("toast {:?}: {}", toast.severity, toast.message);
        self.toasts.push(toast);
    }

    /// Show an error toast and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.notify(error, Severity::Danger);
    }

    /// Set an error, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    /// Allocate a fresh timer handle
    pub fn next_timer_id(&mut self) -> TimerId {
        self.next_timer_id += 1;
        TimerId(self.next_timer_id)
    }

    pub fn next_session_id(&mut self) -> u64 {
        self.next_session_id += 1;
        self.next_session_id
    }
}

impl ModelErrorHandler for Model {
    fn set_error(&mut self, error: String) {
        Model::set_error(self, error)
    }
}
