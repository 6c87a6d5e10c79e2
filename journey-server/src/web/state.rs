//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::gateway::StatsGateway;
use crate::journal::JournalStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Source of journey statistics (usually cached)
    pub gateway: Arc<dyn StatsGateway>,

    /// Journal entries, in memory
    pub journal: Arc<RwLock<JournalStore>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(gateway: impl StatsGateway + 'static, journal: JournalStore) -> Self {
        Self {
            gateway: Arc::new(gateway),
            journal: Arc::new(RwLock::new(journal)),
        }
    }
}
