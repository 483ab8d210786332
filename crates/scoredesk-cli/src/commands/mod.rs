//! Subcommand implementations.

pub mod attempts;
pub mod dashboard;
pub mod flag;
pub mod leaderboard;
pub mod listings;
pub mod recompute;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use scoredesk_client::{load_config_from, HttpScoringService};
use scoredesk_core::actions::AttemptActions;
use scoredesk_core::fetch::DataFetcher;
use scoredesk_core::service::ScoringService;
use scoredesk_core::store::AttemptStore;

/// The wired-up console: one service connection shared by the fetch and
/// action layers over one attempt store.
pub struct Console {
    pub fetcher: DataFetcher,
    pub actions: AttemptActions,
}

impl Console {
    pub fn connect(base_url: Option<String>, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = load_config_from(config_path.as_deref())?;
        if let Some(url) = base_url {
            config.base_url = url;
        }

        let service: Arc<dyn ScoringService> = Arc::new(HttpScoringService::with_timeout(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        ));
        let store = Arc::new(AttemptStore::new());

        Ok(Self {
            fetcher: DataFetcher::new(Arc::clone(&service), Arc::clone(&store)),
            actions: AttemptActions::new(service, store),
        })
    }
}
