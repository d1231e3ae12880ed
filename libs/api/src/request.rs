use serde::{Deserialize, Serialize};

use crate::model::{MediaMode, OutputMode, RecordingLayout, RecordingMode, Role};

/// Body of `POST api/sessions`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    pub media_mode: MediaMode,
    pub recording_mode: RecordingMode,
    pub default_output_mode: OutputMode,
    pub default_recording_layout: RecordingLayout,
    pub default_custom_layout: String,
    pub custom_session_id: String,
}

/// Body of `POST api/tokens`. `kurento_options` fields are sent only when
/// non-zero / non-empty.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateToken {
    pub session: String,
    pub role: Role,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kurento_options: Option<KurentoOptions>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct KurentoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_max_recv_bandwidth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_min_recv_bandwidth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_max_send_bandwidth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_min_send_bandwidth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_filters: Option<Vec<String>>,
}

/// Body of `POST api/recordings/start`. `resolution` and `recording_layout`
/// are sent only for COMPOSED video recordings, `custom_layout` only when the
/// layout is CUSTOM.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartRecording {
    pub session: String,
    pub name: String,
    pub output_mode: OutputMode,
    pub has_audio: bool,
    pub has_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_layout: Option<RecordingLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_layout: Option<String>,
}
