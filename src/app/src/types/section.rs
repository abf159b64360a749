use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration domain on the radio.
///
/// The first eight are part of the device's local config, the rest are module configs.
/// Channels are addressed by index in addition to the section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSection {
    Device,
    Lora,
    Channel,
    Position,
    Power,
    Network,
    Display,
    Bluetooth,
    Security,
    Mqtt,
    Serial,
    Telemetry,
    StoreForward,
    ExternalNotification,
    RangeTest,
    NeighborInfo,
    DetectionSensor,
    Audio,
    RemoteHardware,
    AmbientLighting,
    Paxcounter,
    CannedMessage,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 22] = [
        Self::Device,
        Self::Lora,
        Self::Channel,
        Self::Position,
        Self::Power,
        Self::Network,
        Self::Display,
        Self::Bluetooth,
        Self::Security,
        Self::Mqtt,
        Self::Serial,
        Self::Telemetry,
        Self::StoreForward,
        Self::ExternalNotification,
        Self::RangeTest,
        Self::NeighborInfo,
        Self::DetectionSensor,
        Self::Audio,
        Self::RemoteHardware,
        Self::AmbientLighting,
        Self::Paxcounter,
        Self::CannedMessage,
    ];

    /// Path segment used by the device service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Lora => "lora",
            Self::Channel => "channel",
            Self::Position => "position",
            Self::Power => "power",
            Self::Network => "network",
            Self::Display => "display",
            Self::Bluetooth => "bluetooth",
            Self::Security => "security",
            Self::Mqtt => "mqtt",
            Self::Serial => "serial",
            Self::Telemetry => "telemetry",
            Self::StoreForward => "store_forward",
            Self::ExternalNotification => "external_notification",
            Self::RangeTest => "range_test",
            Self::NeighborInfo => "neighbor_info",
            Self::DetectionSensor => "detection_sensor",
            Self::Audio => "audio",
            Self::RemoteHardware => "remote_hardware",
            Self::AmbientLighting => "ambient_lighting",
            Self::Paxcounter => "paxcounter",
            Self::CannedMessage => "canned_message",
        }
    }

    /// Human-readable name shown in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::Lora => "LoRa",
            Self::Channel => "Channel",
            Self::Position => "Position",
            Self::Power => "Power",
            Self::Network => "Network",
            Self::Display => "Display",
            Self::Bluetooth => "Bluetooth",
            Self::Security => "Security",
            Self::Mqtt => "MQTT",
            Self::Serial => "Serial",
            Self::Telemetry => "Telemetry",
            Self::StoreForward => "Store & Forward",
            Self::ExternalNotification => "External Notification",
            Self::RangeTest => "Range Test",
            Self::NeighborInfo => "Neighbor Info",
            Self::DetectionSensor => "Detection Sensor",
            Self::Audio => "Audio",
            Self::RemoteHardware => "Remote Hardware",
            Self::AmbientLighting => "Ambient Lighting",
            Self::Paxcounter => "Paxcounter",
            Self::CannedMessage => "Canned Message",
        }
    }

    /// Extra warning for sections whose changes can sever the management link
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::Network => Some("Changing network settings may disconnect you from the device."),
            Self::Lora => Some(
                "Changing LoRa settings may disconnect the device or violate local regulations.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
