//! Client SDK for the liveroom media-session orchestration server.
//!
//! The client keeps a pull-reconciled local mirror of server-side sessions:
//! [`Session::fetch`] replaces the cached participant tree wholesale and
//! reports drift, while force-disconnect/unpublish apply targeted local
//! pruning instead of refetching.

use tracing::{info, warn};

pub mod error;
mod http;
pub mod recording;
pub mod registry;
pub mod session;
pub mod token;

pub use api::model::{MediaMode, OutputMode, RecordingLayout, RecordingMode, RecordingStatus, Role};
pub use error::{Error, Result};
pub use recording::{Recording, RecordingProperties, RecordingPropertiesBuilder};
pub use registry::SessionRegistry;
pub use session::{Connection, Publisher, Session, SessionProperties, SessionPropertiesBuilder};
pub use token::{KurentoOptions, TokenOptions, TokenOptionsBuilder};

use http::Http;

/// Handle to one orchestration server: authenticated transport plus the
/// registry of sessions created through it.
#[derive(Clone)]
pub struct LiveRoom {
    http: Http,
    registry: SessionRegistry,
}

impl LiveRoom {
    /// `url` is the server base URL; `secret` the shared API secret used for
    /// HTTP Basic auth.
    pub fn new(url: &str, secret: &str) -> Result<Self> {
        Self::with_registry(url, secret, SessionRegistry::new())
    }

    /// Same as [`LiveRoom::new`] but with a caller-owned registry, e.g. one
    /// shared between handles.
    pub fn with_registry(url: &str, secret: &str, registry: SessionRegistry) -> Result<Self> {
        Ok(LiveRoom {
            http: Http::new(url, secret)?,
            registry,
        })
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Point-in-time copy of the sessions this client knows about.
    pub fn active_sessions(&self) -> Vec<Session> {
        self.registry.snapshot()
    }

    /// Creates a session with default properties and registers it.
    pub async fn create_session(&self) -> Result<Session> {
        self.create_session_with(SessionProperties::default()).await
    }

    /// Creates a session and registers it. A 409 response binds the session
    /// to the supplied custom session id instead of failing.
    pub async fn create_session_with(&self, properties: SessionProperties) -> Result<Session> {
        let session = Session::create(self.http.clone(), self.registry.clone(), properties).await?;
        self.registry.insert(session.clone());
        Ok(session)
    }

    /// Starts recording a session. On success the matching locally registered
    /// session is flagged as being recorded; recordings of sessions this
    /// client never created only log a warning.
    pub async fn start_recording(
        &self,
        session_id: &str,
        properties: RecordingProperties,
    ) -> Result<Recording> {
        let composed_video =
            properties.output_mode == OutputMode::Composed && properties.has_video;
        let body = api::request::StartRecording {
            session: session_id.to_owned(),
            name: properties.name.clone(),
            output_mode: properties.output_mode,
            has_audio: properties.has_audio,
            has_video: properties.has_video,
            resolution: composed_video.then(|| properties.resolution.clone()),
            recording_layout: composed_video.then_some(properties.recording_layout),
            custom_layout: (composed_video
                && properties.recording_layout == RecordingLayout::Custom)
                .then(|| properties.custom_layout.clone()),
        };

        let response = self.http.post(&api::path::recording_start(), &body).await?;
        http::ensure_success(&response)?;
        let recording: Recording = http::json::<api::response::Recording>(response)
            .await?
            .into();

        self.flag_recording(&recording.session_id, true);
        info!("recording '{}' started", recording.id);
        Ok(recording)
    }

    /// Stops a recording and clears the matching session's recording flag.
    pub async fn stop_recording(&self, recording_id: &str) -> Result<Recording> {
        let response = self
            .http
            .post_empty(&api::path::recording_stop(recording_id))
            .await?;
        http::ensure_success(&response)?;
        let recording: Recording = http::json::<api::response::Recording>(response)
            .await?
            .into();

        self.flag_recording(&recording.session_id, false);
        info!("recording '{}' stopped", recording.id);
        Ok(recording)
    }

    pub async fn get_recording(&self, recording_id: &str) -> Result<Recording> {
        let response = self.http.get(&api::path::recording(recording_id)).await?;
        http::ensure_success(&response)?;
        Ok(http::json::<api::response::Recording>(response)
            .await?
            .into())
    }

    pub async fn list_recordings(&self) -> Result<Vec<Recording>> {
        let response = self.http.get(&api::path::recordings()).await?;
        http::ensure_success(&response)?;
        let list: api::response::RecordingList = http::json(response).await?;
        Ok(list.items.into_iter().map(Recording::from).collect())
    }

    pub async fn delete_recording(&self, recording_id: &str) -> Result<()> {
        let response = self.http.delete(&api::path::recording(recording_id)).await?;
        http::ensure_no_content(&response)
    }

    fn flag_recording(&self, session_id: &str, recording: bool) {
        match self.registry.get(session_id) {
            Some(session) => session.set_recording(recording),
            None => warn!(
                "no active session '{}' in this client, recording flag not updated",
                session_id
            ),
        }
    }
}
