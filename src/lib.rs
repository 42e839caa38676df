pub mod coach;
pub mod constants;
pub mod error;
pub mod insights;
pub mod models;
pub mod notify;
pub mod prefs;
pub mod stats;
pub mod store;
pub mod team;
#[cfg(test)]
mod test_utils;
pub mod validation;

use crate::coach::{CoachConfig, CoachService, Navigator};
use crate::insights::InsightEngine;
use crate::notify::{NotificationCenter, NotificationPresenter};
use crate::prefs::Preferences;
use crate::stats::StatsTracker;
use crate::store::{migrations, Store};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Error type for FocusFlow initialization failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Could not determine project directories")]
    NoProjectDirs,

    #[error("Could not create data directory: {0}")]
    DataDirCreation(#[from] std::io::Error),

    #[error("Failed to open store: {0}")]
    StoreOpen(rusqlite::Error),

    #[error("Failed to run store migrations: {0}")]
    Migration(rusqlite::Error),
}

fn default_store_path() -> Result<PathBuf, InitError> {
    let proj_dirs =
        ProjectDirs::from("com", "focusflow", "FocusFlow").ok_or(InitError::NoProjectDirs)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("focusflow.db"))
}

/// The constructed service graph, sharing one store.
pub struct Services {
    pub store: Arc<Mutex<Store>>,
    pub preferences: Arc<Preferences>,
    pub stats: Arc<StatsTracker>,
    pub insights: Arc<InsightEngine>,
    pub notifications: Arc<NotificationCenter>,
}

impl Services {
    /// Build the service graph over an already-opened, migrated store.
    pub fn over(store: Arc<Mutex<Store>>, presenter: Arc<dyn NotificationPresenter>) -> Self {
        Self {
            preferences: Arc::new(Preferences::new(Arc::clone(&store))),
            stats: Arc::new(StatsTracker::new(Arc::clone(&store))),
            insights: Arc::new(InsightEngine::new(Arc::clone(&store))),
            notifications: Arc::new(NotificationCenter::new(Arc::clone(&store), presenter)),
            store,
        }
    }

    /// Construct the coach shell over these services. Callers own the
    /// returned service and its start/stop lifecycle.
    pub fn coach(&self, navigator: Arc<dyn Navigator>, config: CoachConfig) -> CoachService {
        CoachService::new(
            Arc::clone(&self.stats),
            Arc::clone(&self.insights),
            Arc::clone(&self.notifications),
            navigator,
            config,
        )
    }
}

/// Open (or create) the store at the default data path, run migrations, and
/// build the service graph.
pub fn bootstrap(presenter: Arc<dyn NotificationPresenter>) -> Result<Services, InitError> {
    let db_path = default_store_path()?;

    let store = Store::open(&db_path).map_err(InitError::StoreOpen)?;
    migrations::run(store.connection()).map_err(InitError::Migration)?;

    Ok(Services::over(Arc::new(Mutex::new(store)), presenter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::NoopNavigator;
    use crate::notify::NoopPresenter;
    use crate::test_utils::setup_test_store;

    #[test]
    fn test_services_share_one_store() {
        let (store, _dir) = setup_test_store();
        let services = Services::over(store, Arc::new(NoopPresenter));

        services.stats.complete_focus_session(30);
        let snapshot = services.stats.snapshot();
        services.insights.refresh(&snapshot);

        assert_eq!(services.stats.todays_stats().focus_minutes, 30);
        assert!(!services.insights.insights().is_empty());
    }

    #[test]
    fn test_coach_construction_over_services() {
        let (store, _dir) = setup_test_store();
        let services = Services::over(store, Arc::new(NoopPresenter));

        let coach = services.coach(Arc::new(NoopNavigator), CoachConfig::default());
        assert!(!coach.is_running());
    }
}
