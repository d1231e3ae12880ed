use api::model::{OutputMode, RecordingLayout, RecordingStatus};

/// A recording as the server reports it. `size`, `duration` and `url` stay at
/// their defaults until the recording is stopped and processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub id: String,
    pub session_id: String,
    pub created_at: i64,
    pub size: i64,
    pub duration: f64,
    pub url: String,
    pub status: RecordingStatus,
    pub properties: RecordingProperties,
}

impl From<api::response::Recording> for Recording {
    fn from(value: api::response::Recording) -> Self {
        let mut properties = RecordingProperties {
            name: value.name,
            output_mode: value.output_mode,
            has_audio: value.has_audio,
            has_video: value.has_video,
            ..Default::default()
        };
        // Layout and resolution only mean something for COMPOSED video.
        if value.output_mode == OutputMode::Composed && value.has_video {
            properties.resolution = value.resolution;
            properties.recording_layout = match value.recording_layout {
                RecordingLayout::Null => RecordingLayout::BestFit,
                layout => layout,
            };
            if !value.custom_layout.is_empty() {
                properties.custom_layout = value.custom_layout;
            }
        }
        Recording {
            id: value.id,
            session_id: value.session_id,
            created_at: value.created_at,
            size: value.size,
            duration: value.duration,
            url: value.url,
            status: value.status,
            properties,
        }
    }
}

/// Parameters of a recording start request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingProperties {
    /// The archive file is named after this.
    pub name: String,
    pub output_mode: OutputMode,
    /// Only applies when `output_mode` is COMPOSED.
    pub recording_layout: RecordingLayout,
    /// Relative path of the layout, only when `recording_layout` is CUSTOM.
    pub custom_layout: String,
    /// Only applies when `output_mode` is COMPOSED; INDIVIDUAL archives keep
    /// each stream's native resolution.
    pub resolution: String,
    pub has_audio: bool,
    pub has_video: bool,
}

impl Default for RecordingProperties {
    fn default() -> Self {
        RecordingProperties {
            name: String::new(),
            output_mode: OutputMode::Composed,
            recording_layout: RecordingLayout::BestFit,
            custom_layout: String::new(),
            resolution: "1920x1080".to_owned(),
            has_audio: true,
            has_video: true,
        }
    }
}

impl RecordingProperties {
    pub fn builder() -> RecordingPropertiesBuilder {
        RecordingPropertiesBuilder::default()
    }
}

#[derive(Default)]
pub struct RecordingPropertiesBuilder {
    properties: RecordingProperties,
}

impl RecordingPropertiesBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.properties.name = name.to_owned();
        self
    }

    pub fn output_mode(mut self, output_mode: OutputMode) -> Self {
        self.properties.output_mode = output_mode;
        self
    }

    pub fn recording_layout(mut self, recording_layout: RecordingLayout) -> Self {
        self.properties.recording_layout = recording_layout;
        self
    }

    pub fn custom_layout(mut self, custom_layout: &str) -> Self {
        self.properties.custom_layout = custom_layout.to_owned();
        self
    }

    pub fn resolution(mut self, resolution: &str) -> Self {
        self.properties.resolution = resolution.to_owned();
        self
    }

    pub fn has_audio(mut self, has_audio: bool) -> Self {
        self.properties.has_audio = has_audio;
        self
    }

    pub fn has_video(mut self, has_video: bool) -> Self {
        self.properties.has_video = has_video;
        self
    }

    pub fn build(self) -> RecordingProperties {
        self.properties
    }
}
