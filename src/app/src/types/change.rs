use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::section::ConfigSection;

/// Placeholder the device service sends instead of a stored secret
pub const MASK_PLACEHOLDER: &str = "********";

/// Declared kind of a form control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Checkbox,
    Number,
    Select,
    Text,
    Password,
}

/// A named form control and its submitted value.
///
/// For checkboxes `value` is `Some` only when the box is checked, mirroring what a
/// browser puts into `FormData`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub value: Option<String>,
}

impl FormInput {
    pub fn new(name: impl Into<String>, kind: InputKind, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.map(str::to_string),
        }
    }
}

/// Raw submission of one configuration form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    pub section: String,
    #[serde(default)]
    pub channel_index: Option<u32>,
    pub inputs: Vec<FormInput>,
}

/// Normalized field value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Canonical change for one configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub section: ConfigSection,
    pub channel_index: Option<u32>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl ChangeRequest {
    /// Endpoint that persists this change on the device
    pub fn endpoint(&self) -> String {
        match (self.section, self.channel_index) {
            (ConfigSection::Channel, Some(index)) => format!("/api/config/channel/{index}"),
            (section, _) => format!("/api/config/{section}"),
        }
    }

    /// Name of the target shown to the operator
    pub fn target_label(&self) -> String {
        match (self.section, self.channel_index) {
            (ConfigSection::Channel, Some(index)) => format!("Channel {index}"),
            (section, _) => section.label().to_string(),
        }
    }

    /// JSON object sent as request body
    pub fn to_json_body(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), serde_json::Value::from(value)))
                .collect(),
        )
    }
}

/// Confirmation dialog content
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub warning: Option<String>,
    pub note: Option<String>,
}

impl ConfirmationPrompt {
    pub fn for_request(request: &ChangeRequest) -> Self {
        Self {
            title: "Confirm Configuration Change".to_string(),
            message: format!(
                "Are you sure you want to save changes to {} configuration?",
                request.target_label()
            ),
            warning: request.section.warning().map(str::to_string),
            note: (request.section != ConfigSection::Channel)
                .then(|| "The device will be rebooted automatically after saving.".to_string()),
        }
    }
}

/// Change waiting for the operator's confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingChange {
    pub request: ChangeRequest,
    pub prompt: ConfirmationPrompt,
}

impl PendingChange {
    pub fn new(request: ChangeRequest) -> Self {
        let prompt = ConfirmationPrompt::for_request(&request);
        Self { request, prompt }
    }
}
