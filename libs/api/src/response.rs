use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{MediaMode, OutputMode, RecordingLayout, RecordingMode, RecordingStatus, Role};

/// Decodes a value of the expected shape, or falls back to the default when
/// the payload carries something else entirely. Used for the collection
/// fields, which are rebuilt as empty rather than failing the whole decode.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Other(serde::de::IgnoredAny),
    }
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => value,
        Lenient::Other(_) => T::default(),
    })
}

/// Body returned by `POST api/sessions`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Full session state returned by `GET api/sessions/{id}`. Every field
/// tolerates absence and decodes to its default instead of failing.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub recording: bool,
    #[serde(default)]
    pub media_mode: MediaMode,
    #[serde(default)]
    pub recording_mode: RecordingMode,
    #[serde(default)]
    pub default_output_mode: OutputMode,
    #[serde(default)]
    pub default_recording_layout: RecordingLayout,
    #[serde(default)]
    pub default_custom_layout: String,
    #[serde(default)]
    pub custom_session_id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub connections: Connections,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
    #[serde(default)]
    pub number_of_elements: u64,
    #[serde(default, deserialize_with = "or_default")]
    pub content: Vec<Connection>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default)]
    pub connection_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub server_data: String,
    #[serde(default)]
    pub client_data: String,
    #[serde(default, deserialize_with = "or_default")]
    pub publishers: Vec<Publisher>,
    #[serde(default, deserialize_with = "or_default")]
    pub subscribers: Vec<Subscriber>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    #[serde(default)]
    pub stream_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub media_options: MediaOptions,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaOptions {
    #[serde(default)]
    pub has_audio: bool,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub audio_active: bool,
    #[serde(default)]
    pub video_active: bool,
    #[serde(default)]
    pub frame_rate: i32,
    #[serde(default)]
    pub type_of_video: String,
    #[serde(default)]
    pub video_dimensions: String,
}

/// A subscriber entry only carries the stream id of the publisher it points
/// to; the publisher itself lives under some other connection.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(default)]
    pub stream_id: String,
}

/// Body returned by `POST api/tokens`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreated {
    #[serde(default)]
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: RecordingStatus,
    #[serde(default)]
    pub has_audio: bool,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub recording_layout: RecordingLayout,
    #[serde(default)]
    pub custom_layout: String,
    #[serde(default)]
    pub resolution: String,
}

/// Body returned by `GET api/recordings`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordingList {
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "or_default")]
    pub items: Vec<Recording>,
}
