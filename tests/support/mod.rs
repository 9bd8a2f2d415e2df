//! In-process stand-in for the PostgREST backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
};
use tempfile::TempDir;

use gamedb_probe::{RunConfig, run_and_report};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    games: Arc<Mutex<(u16, String)>>,
    teams: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    state: MockState,
    server: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        *state.games.lock().unwrap() = (200, "[]".to_string());

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond_games(&self, status: u16, body: &str) {
        *self.state.games.lock().unwrap() = (status, body.to_string());
    }

    /// Response for the teams query filtered on `game_id`. Unset ids get `[]`.
    pub fn respond_teams(&self, game_id: &str, status: u16, body: &str) {
        self.state
            .teams
            .lock()
            .unwrap()
            .insert(game_id.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Settings file pointing at this backend with key `abc123`.
    pub fn settings(&self) -> String {
        format!(
            "VITE_SUPABASE_URL={}\nVITE_SUPABASE_ANON_KEY=\"abc123\"\n",
            self.base_url()
        )
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let path = uri.path().to_string();
    let (status, body) = match path.as_str() {
        "/rest/v1/games" => state.games.lock().unwrap().clone(),
        "/rest/v1/teams" => {
            let game_id = query
                .get("game_id")
                .and_then(|f| f.strip_prefix("eq."))
                .unwrap_or_default();
            state
                .teams
                .lock()
                .unwrap()
                .get(game_id)
                .cloned()
                .unwrap_or((200, "[]".to_string()))
        }
        _ => (404, r#"{"message":"not found"}"#.to_string()),
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        path,
        query,
        api_key: header_value("apikey"),
        authorization: header_value("authorization"),
    });

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// A settings file in its own temp dir.
pub struct SettingsFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl SettingsFile {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, contents).unwrap();
        Self { _dir: dir, path }
    }
}

/// Run the whole program against `settings` and capture stdout.
pub async fn run_with(settings: &SettingsFile, tweak: impl FnOnce(&mut RunConfig)) -> (u8, String) {
    let mut config = RunConfig {
        settings_path: settings.path.clone(),
        ..Default::default()
    };
    tweak(&mut config);

    let mut out = Vec::new();
    let code = run_and_report(&config, &mut out).await;
    (code, String::from_utf8(out).unwrap())
}

pub async fn run(settings: &SettingsFile) -> (u8, String) {
    run_with(settings, |_| {}).await
}
