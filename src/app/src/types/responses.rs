use serde::{Deserialize, Serialize};

/// Reply to `POST /api/config/{section}` and `POST /api/config/channel/{index}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default)]
    pub reboot_required: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// Set when the write went through but the link dropped afterwards
    #[serde(default)]
    pub note: Option<String>,
}

/// Reply to `POST /api/config/reboot`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebootResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The only part of `GET /api/config/device` a health probe looks at
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeBody {
    #[serde(default)]
    pub success: Option<bool>,
}

impl ProbeBody {
    pub fn is_healthy(&self) -> bool {
        self.success != Some(false)
    }
}
