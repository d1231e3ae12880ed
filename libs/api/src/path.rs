//! Request paths, relative to the server base URL (which always ends in `/`).

pub fn sessions() -> String {
    "api/sessions".to_owned()
}

pub fn session(session: &str) -> String {
    format!("api/sessions/{}", session)
}

pub fn connection(session: &str, connection: &str) -> String {
    format!("api/sessions/{}/connection/{}", session, connection)
}

pub fn stream(session: &str, stream: &str) -> String {
    format!("api/sessions/{}/stream/{}", session, stream)
}

pub fn tokens() -> String {
    "api/tokens".to_owned()
}

pub fn recordings() -> String {
    "api/recordings".to_owned()
}

pub fn recording(recording: &str) -> String {
    format!("api/recordings/{}", recording)
}

pub fn recording_start() -> String {
    "api/recordings/start".to_owned()
}

pub fn recording_stop(recording: &str) -> String {
    format!("api/recordings/stop/{}", recording)
}
