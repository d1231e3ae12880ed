use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const SECRET: &str = "MY_SECRET";

/// In-memory stand-in for the orchestration server. Tests mutate its state
/// directly between client calls to simulate server-side changes.
#[derive(Default)]
pub struct ServerState {
    pub conflict_on_create: bool,
    pub sessions: HashMap<String, MockSession>,
    pub recordings: HashMap<String, Value>,
    pub next_session: u32,
    pub next_recording: u32,
}

#[derive(Default, Clone)]
pub struct MockSession {
    pub created_at: i64,
    pub recording: bool,
    pub connections: Vec<MockConnection>,
}

#[derive(Default, Clone)]
pub struct MockConnection {
    pub id: String,
    pub publishers: Vec<String>,
    pub subscribers: Vec<String>,
}

pub struct Mock {
    pub addr: SocketAddr,
    pub state: Arc<Mutex<ServerState>>,
}

impl Mock {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn add_session(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(id.to_owned(), MockSession {
                created_at: 1000,
                ..Default::default()
            });
    }

    pub fn add_connection(
        &self,
        session: &str,
        connection: &str,
        publishers: &[&str],
        subscribers: &[&str],
    ) {
        let mut state = self.state.lock().unwrap();
        let session = state.sessions.get_mut(session).unwrap();
        session.connections.push(MockConnection {
            id: connection.to_owned(),
            publishers: publishers.iter().map(|s| s.to_string()).collect(),
            subscribers: subscribers.iter().map(|s| s.to_string()).collect(),
        });
    }
}

pub async fn serve() -> Mock {
    let state = Arc::new(Mutex::new(ServerState::default()));
    let app = Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route(
            "/api/sessions/:id/connection/:connection",
            delete(delete_connection),
        )
        .route("/api/sessions/:id/stream/:stream", delete(delete_stream))
        .route("/api/tokens", post(create_token))
        .route("/api/recordings", get(list_recordings))
        .route("/api/recordings/start", post(start_recording))
        .route("/api/recordings/stop/:id", post(stop_recording))
        .route(
            "/api/recordings/:id",
            get(get_recording).delete(delete_recording),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Mock { addr, state }
}

type Shared = Arc<Mutex<ServerState>>;

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("LIVEROOMAPP:{}", SECRET))
    );
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

async fn create_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    let mut state = state.lock().unwrap();
    if state.conflict_on_create {
        return (StatusCode::CONFLICT, Json(json!({}))).into_response();
    }
    let custom = body["customSessionId"].as_str().unwrap_or("");
    let id = if custom.is_empty() {
        state.next_session += 1;
        format!("ses_{}", state.next_session)
    } else {
        custom.to_owned()
    };
    let created_at = 1_700_000_000_000i64;
    state.sessions.insert(id.clone(), MockSession {
        created_at,
        ..Default::default()
    });
    Json(json!({ "id": id, "createdAt": created_at })).into_response()
}

fn session_json(id: &str, session: &MockSession) -> Value {
    let content: Vec<Value> = session
        .connections
        .iter()
        .map(|connection| {
            json!({
                "connectionId": connection.id,
                "createdAt": 0,
                "role": "PUBLISHER",
                "token": format!("tok-{}", connection.id),
                "location": "unknown",
                "platform": "Chrome",
                "serverData": "",
                "clientData": "",
                "publishers": connection.publishers.iter().map(|stream| json!({
                    "streamId": stream,
                    "createdAt": 0,
                    "mediaOptions": {
                        "hasAudio": true,
                        "hasVideo": true,
                        "audioActive": true,
                        "videoActive": true,
                        "frameRate": 30,
                        "typeOfVideo": "CAMERA",
                        "videoDimensions": "640x480",
                    },
                })).collect::<Vec<_>>(),
                "subscribers": connection.subscribers.iter().map(|stream| json!({
                    "streamId": stream,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "sessionId": id,
        "createdAt": session.created_at,
        "recording": session.recording,
        "mediaMode": "ROUTED",
        "recordingMode": "MANUAL",
        "defaultOutputMode": "COMPOSED",
        "defaultRecordingLayout": "BEST_FIT",
        "defaultCustomLayout": "",
        "connections": {
            "numberOfElements": content.len(),
            "content": content,
        },
    })
}

async fn get_session(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.lock().unwrap();
    match state.sessions.get(&id) {
        Some(session) => Json(session_json(&id, session)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_session(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    match state.sessions.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_connection(
    State(state): State<Shared>,
    Path((id, connection)): Path<(String, String)>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    match state.sessions.get_mut(&id) {
        Some(session) => {
            let mut evicted_streams = Vec::new();
            session.connections.retain(|c| {
                if c.id == connection {
                    evicted_streams.extend(c.publishers.iter().cloned());
                    false
                } else {
                    true
                }
            });
            // Disconnecting a publisher ends its streams, so subscriptions to
            // them disappear server-side too.
            for remaining in session.connections.iter_mut() {
                remaining
                    .subscribers
                    .retain(|stream| !evicted_streams.contains(stream));
            }
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_stream(
    State(state): State<Shared>,
    Path((id, stream)): Path<(String, String)>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    match state.sessions.get_mut(&id) {
        Some(session) => {
            for connection in session.connections.iter_mut() {
                connection.publishers.retain(|s| s != &stream);
                connection.subscribers.retain(|s| s != &stream);
            }
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn create_token(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let session = body["session"].as_str().unwrap_or("").to_owned();
    let state = state.lock().unwrap();
    if !state.sessions.contains_key(&session) {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({ "id": format!("wss://mock?sessionId={}&token=tok", session) })).into_response()
}

fn recording_json(id: &str, session: &str, status: &str, body: &Value) -> Value {
    json!({
        "id": id,
        "name": body["name"].as_str().unwrap_or(""),
        "sessionId": session,
        "createdAt": 1_700_000_000_000i64,
        "size": 0,
        "duration": 0.0,
        "url": "",
        "status": status,
        "hasAudio": body["hasAudio"].as_bool().unwrap_or(true),
        "hasVideo": body["hasVideo"].as_bool().unwrap_or(true),
        "outputMode": body["outputMode"].as_str().unwrap_or("COMPOSED"),
        "recordingLayout": body["recordingLayout"].as_str().unwrap_or("BEST_FIT"),
        "customLayout": body["customLayout"].as_str().unwrap_or(""),
        "resolution": body["resolution"].as_str().unwrap_or("1920x1080"),
    })
}

async fn start_recording(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    let session = body["session"].as_str().unwrap_or("").to_owned();
    if !state.sessions.contains_key(&session) {
        return StatusCode::NOT_FOUND.into_response();
    }
    state.next_recording += 1;
    let id = format!("rec_{}", state.next_recording);
    let recording = recording_json(&id, &session, "started", &body);
    state.recordings.insert(id, recording.clone());
    if let Some(mock) = state.sessions.get_mut(&session) {
        mock.recording = true;
    }
    Json(recording).into_response()
}

async fn stop_recording(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    match state.recordings.get_mut(&id) {
        Some(recording) => {
            recording["status"] = json!("stopped");
            Json(recording.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_recording(State(state): State<Shared>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.lock().unwrap();
    match state.recordings.get(&id) {
        Some(recording) => Json(recording.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list_recordings(State(state): State<Shared>) -> impl IntoResponse {
    let state = state.lock().unwrap();
    let items: Vec<Value> = state.recordings.values().cloned().collect();
    Json(json!({ "count": items.len(), "items": items }))
}

async fn delete_recording(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    match state.recordings.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
