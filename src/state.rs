//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::{Catalog, EventStore, Maintenance},
    scoring::{Clock, SystemClock},
    services::{AdminService, CompetitionService, LeaderboardService, ScoringService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    scoring: ScoringService,
    leaderboard: LeaderboardService,
    competitions: CompetitionService,
    admin: AdminService,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create application state over a store that serves both catalog and events
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: Catalog + EventStore + Maintenance + 'static,
    {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    /// Create application state with an explicit clock
    pub fn with_clock<S>(store: Arc<S>, clock: Arc<dyn Clock>, config: Config) -> Self
    where
        S: Catalog + EventStore + Maintenance + 'static,
    {
        let catalog: Arc<dyn Catalog> = store.clone();
        let events: Arc<dyn EventStore> = store.clone();
        let maintenance: Arc<dyn Maintenance> = store;

        let scoring = ScoringService::new(
            catalog.clone(),
            events.clone(),
            clock.clone(),
            config.scoring.trust_client_timestamps,
        );
        let admin = AdminService::new(catalog.clone(), maintenance, scoring.locks());

        Self {
            inner: Arc::new(AppStateInner {
                leaderboard: LeaderboardService::new(catalog.clone(), events.clone()),
                competitions: CompetitionService::new(catalog, events, clock),
                scoring,
                admin,
                config,
            }),
        }
    }

    pub fn scoring(&self) -> &ScoringService {
        &self.inner.scoring
    }

    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.inner.leaderboard
    }

    pub fn competitions(&self) -> &CompetitionService {
        &self.inner.competitions
    }

    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
