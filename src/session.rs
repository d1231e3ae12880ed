use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use api::model::{MediaMode, OutputMode, RecordingLayout, RecordingMode, Role};

use crate::error::{Error, Result};
use crate::http::{self, Http};
use crate::registry::{SessionRegistry, WeakRegistry};
use crate::token::TokenOptions;

/// Configuration a session is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProperties {
    pub media_mode: MediaMode,
    pub recording_mode: RecordingMode,
    pub default_output_mode: OutputMode,
    pub default_recording_layout: RecordingLayout,
    pub default_custom_layout: String,
    /// Fixes the session id instead of letting the server pick one. Empty
    /// means server-generated.
    pub custom_session_id: String,
}

impl Default for SessionProperties {
    fn default() -> Self {
        SessionProperties {
            media_mode: MediaMode::Routed,
            recording_mode: RecordingMode::Manual,
            default_output_mode: OutputMode::Composed,
            default_recording_layout: RecordingLayout::BestFit,
            default_custom_layout: String::new(),
            custom_session_id: String::new(),
        }
    }
}

impl SessionProperties {
    pub fn builder() -> SessionPropertiesBuilder {
        SessionPropertiesBuilder::default()
    }
}

#[derive(Default)]
pub struct SessionPropertiesBuilder {
    properties: SessionProperties,
}

impl SessionPropertiesBuilder {
    pub fn media_mode(mut self, media_mode: MediaMode) -> Self {
        self.properties.media_mode = media_mode;
        self
    }

    pub fn recording_mode(mut self, recording_mode: RecordingMode) -> Self {
        self.properties.recording_mode = recording_mode;
        self
    }

    pub fn default_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.properties.default_output_mode = output_mode;
        self
    }

    pub fn default_recording_layout(mut self, layout: RecordingLayout) -> Self {
        self.properties.default_recording_layout = layout;
        self
    }

    pub fn default_custom_layout(mut self, path: &str) -> Self {
        self.properties.default_custom_layout = path.to_owned();
        self
    }

    pub fn custom_session_id(mut self, custom_session_id: &str) -> Self {
        self.properties.custom_session_id = custom_session_id.to_owned();
        self
    }

    pub fn build(self) -> SessionProperties {
        self.properties
    }
}

/// A stream some connection is publishing into the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Publisher {
    /// Unique within the session, paired 1:1 with a media stream.
    pub stream_id: String,
    pub created_at: i64,
    pub has_audio: bool,
    pub has_video: bool,
    pub audio_active: bool,
    pub video_active: bool,
    pub frame_rate: i32,
    pub type_of_video: String,
    pub video_dimensions: String,
}

impl From<api::response::Publisher> for Publisher {
    fn from(value: api::response::Publisher) -> Self {
        Publisher {
            stream_id: value.stream_id,
            created_at: value.created_at,
            has_audio: value.media_options.has_audio,
            has_video: value.media_options.has_video,
            audio_active: value.media_options.audio_active,
            video_active: value.media_options.video_active,
            frame_rate: value.media_options.frame_rate,
            type_of_video: value.media_options.type_of_video,
            video_dimensions: value.media_options.video_dimensions,
        }
    }
}

/// A participant's attachment to the session. Owns its publishers; the
/// subscriber entries are plain stream ids pointing at publishers owned by
/// sibling connections, never followed for lifetime management.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub connection_id: String,
    pub created_at: i64,
    pub role: Role,
    pub token: String,
    pub location: String,
    pub platform: String,
    pub server_data: String,
    pub client_data: String,
    pub publishers: Vec<Publisher>,
    pub subscribers: Vec<String>,
}

impl From<api::response::Connection> for Connection {
    fn from(value: api::response::Connection) -> Self {
        // Publishers are keyed by stream id; a duplicate entry in the
        // payload replaces the earlier one.
        let mut publishers: Vec<Publisher> = Vec::new();
        for publisher in value.publishers {
            let publisher = Publisher::from(publisher);
            match publishers
                .iter()
                .position(|p| p.stream_id == publisher.stream_id)
            {
                Some(i) => publishers[i] = publisher,
                None => publishers.push(publisher),
            }
        }
        let subscribers = value.subscribers.into_iter().map(|s| s.stream_id).collect();
        Connection {
            connection_id: value.connection_id,
            created_at: value.created_at,
            role: value.role,
            token: value.token,
            location: value.location,
            platform: value.platform,
            server_data: value.server_data,
            client_data: value.client_data,
            publishers,
            subscribers,
        }
    }
}

/// Everything behind the session's lock: the mutable mirror of server state.
struct State {
    created_at: i64,
    recording: bool,
    properties: SessionProperties,
    connections: HashMap<String, Connection>,
}

impl State {
    fn new(created_at: i64, properties: SessionProperties) -> Self {
        State {
            created_at,
            recording: false,
            properties,
            connections: HashMap::new(),
        }
    }

    /// Replaces the whole mirror with the server's view. The session id is
    /// bound once at creation and never rebound here; a locally supplied
    /// custom session id also survives the refresh.
    fn apply(&mut self, remote: api::response::Session) {
        self.created_at = remote.created_at;
        self.recording = remote.recording;
        self.properties = SessionProperties {
            media_mode: remote.media_mode,
            recording_mode: remote.recording_mode,
            default_output_mode: remote.default_output_mode,
            default_recording_layout: match remote.default_recording_layout {
                RecordingLayout::Null => RecordingLayout::BestFit,
                layout => layout,
            },
            default_custom_layout: remote.default_custom_layout,
            custom_session_id: if self.properties.custom_session_id.is_empty() {
                remote.custom_session_id
            } else {
                self.properties.custom_session_id.clone()
            },
        };
        self.connections = remote
            .connections
            .content
            .into_iter()
            .map(Connection::from)
            .map(|c| (c.connection_id.clone(), c))
            .collect();
    }

    /// Removes one connection and prunes every stream it published from the
    /// remaining connections' subscriber lists, so that each subscriber entry
    /// still points at a publisher that exists in the cache.
    fn evict_connection(&mut self, connection_id: &str) -> Option<Connection> {
        let evicted = self.connections.remove(connection_id)?;
        for publisher in &evicted.publishers {
            for connection in self.connections.values_mut() {
                connection
                    .subscribers
                    .retain(|stream_id| stream_id != &publisher.stream_id);
            }
        }
        Some(evicted)
    }

    /// Removes one stream everywhere: from its owner's publishers and from
    /// every subscriber list that references it. Both removals are attempted
    /// per connection so the operation also repairs a stale view.
    fn drop_stream(&mut self, stream_id: &str) {
        for connection in self.connections.values_mut() {
            let owned = connection.publishers.len();
            connection.publishers.retain(|p| p.stream_id != stream_id);
            if connection.publishers.len() < owned {
                continue;
            }
            connection.subscribers.retain(|s| s != stream_id);
        }
    }

    /// Canonical comparable form of the visible state, used by `fetch()` to
    /// detect drift. Connections, publishers and subscribers are sorted so
    /// the comparison never depends on map iteration order.
    fn snapshot(&self, session_id: &str) -> Value {
        let mut connections: Vec<&Connection> = self.connections.values().collect();
        connections.sort_by(|a, b| a.connection_id.cmp(&b.connection_id));

        let content: Vec<Value> = connections
            .iter()
            .map(|connection| {
                let mut publishers: Vec<&Publisher> = connection.publishers.iter().collect();
                publishers.sort_by(|a, b| a.stream_id.cmp(&b.stream_id));
                let publishers: Vec<Value> = publishers
                    .iter()
                    .map(|p| {
                        json!({
                            "streamId": p.stream_id,
                            "hasAudio": p.has_audio,
                            "hasVideo": p.has_video,
                            "audioActive": p.audio_active,
                            "videoActive": p.video_active,
                            "frameRate": p.frame_rate,
                            "typeOfVideo": p.type_of_video,
                            "videoDimensions": p.video_dimensions,
                        })
                    })
                    .collect();

                let mut subscribers = connection.subscribers.clone();
                subscribers.sort();

                json!({
                    "connectionId": connection.connection_id,
                    "role": connection.role,
                    "token": connection.token,
                    "clientData": connection.client_data,
                    "serverData": connection.server_data,
                    "publishers": publishers,
                    "subscribers": subscribers,
                })
            })
            .collect();

        json!({
            "sessionId": session_id,
            "createdAt": self.created_at,
            "customSessionId": self.properties.custom_session_id,
            "recording": self.recording,
            "mediaMode": self.properties.media_mode,
            "recordingMode": self.properties.recording_mode,
            "defaultOutputMode": self.properties.default_output_mode,
            "defaultRecordingLayout": self.properties.default_recording_layout,
            "defaultCustomLayout": self.properties.default_custom_layout,
            "connections": {
                "numberOfElements": content.len(),
                "content": content,
            },
        })
    }
}

/// Local mirror of one server-side session. Cheap to clone; clones share the
/// same cache. The id is bound once by the creation round-trip and never
/// changes afterwards.
#[derive(Clone)]
pub struct Session {
    http: Http,
    registry: WeakRegistry,
    id: String,
    state: Arc<RwLock<State>>,
}

impl Session {
    /// Creation round-trip. A 409 means a session with the supplied custom id
    /// already exists server-side; it is bound instead of reported as an
    /// error.
    pub(crate) async fn create(
        http: Http,
        registry: SessionRegistry,
        properties: SessionProperties,
    ) -> Result<Session> {
        let body = api::request::CreateSession {
            media_mode: properties.media_mode,
            recording_mode: properties.recording_mode,
            default_output_mode: properties.default_output_mode,
            default_recording_layout: properties.default_recording_layout,
            default_custom_layout: properties.default_custom_layout.clone(),
            custom_session_id: properties.custom_session_id.clone(),
        };
        let response = http.post(&api::path::sessions(), &body).await?;
        let status = response.status();

        if status.is_success() {
            let created: api::response::SessionCreated = http::json(response).await?;
            info!("session '{}' created", created.id);
            Ok(Session::bind(
                http,
                registry,
                created.id,
                created.created_at,
                properties,
            ))
        } else if status == StatusCode::CONFLICT {
            let id = properties.custom_session_id.clone();
            info!("session '{}' already exists, binding to it", id);
            Ok(Session::bind(http, registry, id, 0, properties))
        } else {
            Err(Error::Http(status))
        }
    }

    fn bind(
        http: Http,
        registry: SessionRegistry,
        id: String,
        created_at: i64,
        properties: SessionProperties,
    ) -> Session {
        Session {
            http,
            registry: registry.downgrade(),
            id,
            state: Arc::new(RwLock::new(State::new(created_at, properties))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// UTC milliseconds; 0 until a successful create or fetch binds it.
    pub fn created_at(&self) -> i64 {
        self.state.read().unwrap().created_at
    }

    pub fn properties(&self) -> SessionProperties {
        self.state.read().unwrap().properties.clone()
    }

    pub fn is_being_recorded(&self) -> bool {
        self.state.read().unwrap().recording
    }

    pub(crate) fn set_recording(&self, recording: bool) {
        self.state.write().unwrap().recording = recording;
    }

    /// Point-in-time copy of the cached connections. Unchanged since the last
    /// `fetch()`, except for the local pruning done by `force_disconnect` and
    /// `force_unpublish`.
    pub fn get_active_connections(&self) -> Vec<Connection> {
        self.state.read().unwrap().connections.values().cloned().collect()
    }

    /// Requests a new token scoped to this session.
    pub async fn generate_token(&self, options: TokenOptions) -> Result<String> {
        let body = api::request::CreateToken {
            session: self.id.clone(),
            role: options.role,
            data: options.data,
            kurento_options: options.kurento_options.map(|k| k.into_request()),
        };
        let response = self.http.post(&api::path::tokens(), &body).await?;
        http::ensure_success(&response)?;
        let token: api::response::TokenCreated = http::json(response).await?;
        info!("token issued for session '{}'", self.id);
        Ok(token.id)
    }

    /// Reconciles the cache with the server: replaces the whole
    /// connection/publisher/subscriber sub-tree and reports whether anything
    /// visible changed. This is the only operation that resolves drift.
    pub async fn fetch(&self) -> Result<bool> {
        let before = self.state.read().unwrap().snapshot(&self.id);

        let response = self.http.get(&api::path::session(&self.id)).await?;
        http::ensure_success(&response)?;
        let remote: api::response::Session = http::json(response).await?;

        let after = {
            let mut state = self.state.write().unwrap();
            state.apply(remote);
            state.snapshot(&self.id)
        };

        let changed = before != after;
        info!("session '{}' fetched, changed: {}", self.id, changed);
        Ok(changed)
    }

    /// Closes the session server-side and removes it from the registry.
    pub async fn close(&self) -> Result<bool> {
        let response = self.http.delete(&api::path::session(&self.id)).await?;
        http::ensure_no_content(&response)?;
        self.registry.remove(&self.id);
        info!("session '{}' closed", self.id);
        Ok(true)
    }

    /// Evicts one participant. On 204 the connection is removed from the
    /// cache and every stream it published is pruned from the remaining
    /// subscriber lists, with no further network call. A connection the cache
    /// never saw leaves the cache untouched until the next `fetch()`.
    pub async fn force_disconnect(&self, connection_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(&api::path::connection(&self.id, connection_id))
            .await?;
        http::ensure_no_content(&response)?;

        let evicted = self.state.write().unwrap().evict_connection(connection_id);
        match evicted {
            Some(_) => info!("connection '{}' closed", connection_id),
            None => warn!(
                "closed connection '{}' was not in the local cache of session '{}'",
                connection_id, self.id
            ),
        }
        Ok(())
    }

    /// Unpublishes one stream. On 204 the stream is removed from its owner's
    /// publishers and from every subscriber list that references it.
    pub async fn force_unpublish(&self, stream_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(&api::path::stream(&self.id, stream_id))
            .await?;
        http::ensure_no_content(&response)?;

        self.state.write().unwrap().drop_stream(stream_id);
        info!("stream '{}' unpublished", stream_id);
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}
