// src/state.rs

use axum::extract::FromRef;

use crate::config::Config;
use crate::quiz::SessionStore;
use crate::repo::Repos;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repos,
    pub sessions: SessionStore,
    pub config: Config,
}

impl FromRef<AppState> for Repos {
    fn from_ref(state: &AppState) -> Self {
        state.repos.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
