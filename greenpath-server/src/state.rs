//! Shared application state.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use greenpath_core::Error;
use greenpath_core::tracking::{self, SessionState};

use crate::clients::{NominatimClient, OsrmClient, OverpassClient};
use crate::config::ServerConfig;
use crate::store::JsonFileStore;

pub struct AppState {
    pub config: ServerConfig,
    pub osrm: OsrmClient,
    pub nominatim: NominatimClient,
    pub overpass: OverpassClient,
    /// Session aggregates plus their backing store. A plain mutex: the
    /// session is single-user and every critical section is short.
    pub session: Mutex<SessionHandle>,
    /// Search generation counter; stale comparison responses are discarded
    /// when a newer search has started. The counter is global across
    /// endpoints, so any new search (comparison or geocode) supersedes an
    /// in-flight one; fine for a single-user session.
    generation: AtomicU64,
}

pub struct SessionHandle {
    pub state: SessionState,
    pub store: JsonFileStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;

        let store = JsonFileStore::open(config.store_path.clone())?;
        let state = tracking::load_session(&store)?;

        Ok(Self {
            osrm: OsrmClient::new(http.clone(), config.osrm_url.clone()),
            nominatim: NominatimClient::new(http.clone(), config.nominatim_url.clone()),
            overpass: OverpassClient::new(http, config.overpass_url.clone()),
            session: Mutex::new(SessionHandle { state, store }),
            generation: AtomicU64::new(0),
            config,
        })
    }

    /// Starts a new search generation and returns its token.
    pub fn begin_search(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given token still describes the latest search.
    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Persists the current session state through the backing store.
    pub fn persist_session(&self) -> Result<(), Error> {
        let mut handle = self
            .session
            .lock()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))?;
        let SessionHandle { state, store } = &mut *handle;
        tracking::save_session(store, state)
    }
}
