use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::metrics::{SessionCounters, TotalMetrics};
use crate::store::Store;

/// Shared state: live session counters, the totals loaded at startup, and
/// the store they get merged back into at shutdown.
pub struct AppState {
    pub session: SessionCounters,
    pub totals: TotalMetrics,
    pub started_at: Instant,
    pub store: Store,
}

impl AppState {
    pub fn initialize(config: &Config) -> Result<Arc<Self>> {
        let store = match &config.data_file {
            Some(path) => Store::new(path.clone()),
            None => Store::at_default_location()?,
        };
        let totals = store.load();

        Ok(Arc::new(Self {
            session: SessionCounters::default(),
            totals,
            started_at: Instant::now(),
            store,
        }))
    }
}
