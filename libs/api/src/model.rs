use serde::{Deserialize, Serialize};

/// Permission level bound to a token and, after the participant joins,
/// to its connection.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Can receive published streams of other participants.
    #[serde(rename = "SUBSCRIBER")]
    Subscriber,

    /// SUBSCRIBER permissions, plus publishing its own streams.
    #[serde(rename = "PUBLISHER")]
    Publisher,

    /// PUBLISHER permissions, plus force-unpublishing and force-disconnecting
    /// third-party streams and connections.
    #[serde(rename = "MODERATOR")]
    Moderator,

    /// Unset. Never sent by a client; decoded when the server omits the field.
    #[default]
    #[serde(other)]
    #[serde(rename = "NULL")]
    Null,
}

/// How media is transported between participants.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaMode {
    /// Direct p2p connections between clients.
    #[serde(rename = "RELAYED")]
    Relayed,

    /// Streams routed through the media node.
    #[serde(rename = "ROUTED")]
    Routed,

    #[default]
    #[serde(other)]
    #[serde(rename = "NULL")]
    Null,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingMode {
    /// Recording starts with the first published stream and stops when the
    /// last participant leaves.
    #[serde(rename = "ALWAYS")]
    Always,

    /// Recording only happens through explicit start/stop calls.
    #[serde(rename = "MANUAL")]
    Manual,

    #[default]
    #[serde(other)]
    #[serde(rename = "NULL")]
    Null,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// All streams mixed into a single archive with a layout.
    #[serde(rename = "COMPOSED")]
    Composed,

    /// One archive per stream.
    #[serde(rename = "INDIVIDUAL")]
    Individual,

    #[default]
    #[serde(other)]
    #[serde(rename = "NULL")]
    Null,
}

/// Layout of COMPOSED recordings.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingLayout {
    /// Videos evenly distributed, taking up as much space as possible.
    #[serde(rename = "BEST_FIT")]
    BestFit,

    #[serde(rename = "PICTURE_IN_PICTURE")]
    PictureInPicture,

    #[serde(rename = "VERTICAL_PRESENTATION")]
    VerticalPresentation,

    #[serde(rename = "HORIZONTAL_PRESENTATION")]
    HorizontalPresentation,

    /// Server-side custom layout, addressed by a relative path.
    #[serde(rename = "CUSTOM")]
    Custom,

    #[default]
    #[serde(other)]
    #[serde(rename = "NULL")]
    Null,
}

/// Server-side recording state. Lowercase on the wire.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingStatus {
    /// Starting up, cannot be stopped yet. Some recordings skip straight
    /// to `started`.
    #[serde(rename = "starting")]
    Starting,

    #[serde(rename = "started")]
    Started,

    /// Stopped and being post-processed; will reach `ready`.
    #[serde(rename = "stopped")]
    Stopped,

    /// Available for download.
    #[serde(rename = "ready")]
    Ready,

    /// Reachable from `starting`, `started` and `stopped`.
    #[serde(rename = "failed")]
    Failed,

    #[default]
    #[serde(other)]
    #[serde(rename = "null")]
    Null,
}
