//! Client telemetry event types
//!
//! The same structs serve both wire formats: the prost derives give the
//! protobuf encoding and the serde derives give the JSON encoding, so a bundle
//! decoded from one format re-encodes to the other without loss.

use serde::{Deserialize, Deserializer, Serialize};

/// Category of a client event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ClientEventType {
    Unknown = 0,
    AppOpen = 1,
    AppClose = 2,
    ScreenView = 3,
    UserAction = 4,
    Crash = 5,
}

impl ClientEventType {
    /// Name used in the JSON wire format
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ClientEventType::Unknown => "UNKNOWN",
            ClientEventType::AppOpen => "APP_OPEN",
            ClientEventType::AppClose => "APP_CLOSE",
            ClientEventType::ScreenView => "SCREEN_VIEW",
            ClientEventType::UserAction => "USER_ACTION",
            ClientEventType::Crash => "CRASH",
        }
    }

    /// Parse a JSON wire name back into the enum
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNKNOWN" => Some(ClientEventType::Unknown),
            "APP_OPEN" => Some(ClientEventType::AppOpen),
            "APP_CLOSE" => Some(ClientEventType::AppClose),
            "SCREEN_VIEW" => Some(ClientEventType::ScreenView),
            "USER_ACTION" => Some(ClientEventType::UserAction),
            "CRASH" => Some(ClientEventType::Crash),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// A single client-submitted telemetry event
#[derive(Clone, PartialEq, Eq, Hash, prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientEventData {
    /// Store key, must be non-empty
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "null_as_default")]
    pub event_id: String,
    #[prost(enumeration = "ClientEventType", tag = "2")]
    #[serde(with = "event_type_name")]
    pub event_type: i32,
    /// Seconds since epoch
    #[prost(int64, tag = "3")]
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// Opaque payload
    #[prost(string, tag = "4")]
    #[serde(deserialize_with = "null_as_default")]
    pub data: String,
}

impl ClientEventData {
    /// Create a new event record
    pub fn new(
        event_id: impl Into<String>,
        event_type: ClientEventType,
        timestamp: i64,
        data: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            timestamp,
            data: data.into(),
        }
    }

    /// True when the record can be stored
    pub fn has_event_id(&self) -> bool {
        !self.event_id.is_empty()
    }
}

/// A bundle of events submitted in one POST call
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientEventUploadRequest {
    /// Informational, used for logging only
    #[prost(string, tag = "1")]
    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,
    #[prost(string, tag = "2")]
    #[serde(deserialize_with = "null_as_default")]
    pub device_type: String,
    #[prost(message, repeated, tag = "3")]
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<ClientEventData>,
}

impl ClientEventUploadRequest {
    /// Create a new upload request
    pub fn new(
        request_id: impl Into<String>,
        device_type: impl Into<String>,
        events: Vec<ClientEventData>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            device_type: device_type.into(),
            events,
        }
    }
}

/// An explicit JSON `null` reads as the field's default, same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// JSON form of `eventType`: known values by name, unknown values as raw integers.
/// Input accepts either, and `null` reads as `UNKNOWN`.
///
/// Writing names differs from encoders that emit protobuf enums as integers;
/// clients that only parse the numeric form must map names back themselves.
mod event_type_name {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ClientEventType;

    pub fn serialize<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        match ClientEventType::try_from(*value) {
            Ok(kind) => serializer.serialize_str(kind.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i32),
            Name(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(i32::default()),
            Some(Repr::Number(value)) => Ok(value),
            Some(Repr::Name(name)) => ClientEventType::from_str_name(&name)
                .map(i32::from)
                .ok_or_else(|| D::Error::custom(format!("unknown eventType '{}'", name))),
        }
    }
}
