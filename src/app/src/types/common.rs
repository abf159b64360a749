use serde::{Deserialize, Serialize};

/// Toast severity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

/// Transient notification rendered by the shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Overlay spinner state (UI state)
///
/// Used as the reboot status view: `title` is the header, `text` the status line and
/// `detail` the timer line below it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlaySpinnerState {
    overlay: bool,
    title: String,
    text: Option<String>,
    detail: Option<String>,
    severity: Severity,
    timed_out: bool,
    countdown_seconds: Option<u32>,
}

impl OverlaySpinnerState {
    /// Create a new overlay spinner with the given title (shown by default)
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            overlay: true,
            title: title.into(),
            severity: Severity::Warning,
            ..Default::default()
        }
    }

    /// Builder pattern: add optional text to the spinner
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder pattern: add a detail line below the text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builder pattern: add optional countdown to the spinner
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_seconds = Some(seconds);
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Update the optional text message
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.detail = Some(detail.into());
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    /// Update the optional countdown
    pub fn set_countdown(&mut self, seconds: Option<u32>) {
        self.countdown_seconds = seconds;
    }

    /// Mark the spinner as timed out; the shell then offers a close button
    pub fn set_timed_out(&mut self) {
        self.timed_out = true;
        self.severity = Severity::Danger;
        self.countdown_seconds = None;
    }

    /// Check if the overlay is currently visible
    pub fn is_visible(&self) -> bool {
        self.overlay
    }

    /// Reset to default (hidden) state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Check if the spinner has timed out
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn countdown_seconds(&self) -> Option<u32> {
        self.countdown_seconds
    }
}
