use crate::error::AppError;
use crate::models::{AppSettings, AppSettingsPatch};
use crate::store::{lock_store, schema, Store};
use crate::validation::{validate_goal_minutes, validate_session_minutes};
use log::{error, warn};
use std::sync::{Arc, Mutex};

/// User preference store: read merged over defaults, shallow-merge partial
/// updates, persist on every change. Storage read failures fall back to
/// defaults; write failures are logged and dropped.
pub struct Preferences {
    store: Arc<Mutex<Store>>,
}

impl Preferences {
    pub fn new(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> AppSettings {
        let store = lock_store(&self.store, "Preferences");
        match store.read_json(schema::KEY_APP_SETTINGS) {
            Ok(Some(settings)) => settings,
            Ok(None) => AppSettings::default(),
            Err(e) => {
                warn!("Failed to load app settings, using defaults: {e}");
                AppSettings::default()
            }
        }
    }

    /// Validate and merge `patch` into the current settings, persist, and
    /// return the result. Only invalid input is an error.
    pub fn update(&self, patch: &AppSettingsPatch) -> Result<AppSettings, AppError> {
        Self::validate(patch)?;

        let mut settings = self.get();
        patch.apply(&mut settings);

        let store = lock_store(&self.store, "Preferences");
        if let Err(e) = store.write_json(schema::KEY_APP_SETTINGS, &settings) {
            error!("Failed to persist app settings: {e}");
        }
        Ok(settings)
    }

    fn validate(patch: &AppSettingsPatch) -> Result<(), AppError> {
        if let Some(minutes) = patch.focus_duration_minutes {
            validate_session_minutes(minutes)?;
        }
        if let Some(minutes) = patch.short_break_minutes {
            validate_session_minutes(minutes)?;
        }
        if let Some(minutes) = patch.long_break_minutes {
            validate_session_minutes(minutes)?;
        }
        if let Some(minutes) = patch.daily_focus_goal_minutes {
            validate_goal_minutes("daily_focus_goal_minutes", minutes)?;
        }
        if let Some(minutes) = patch.weekly_focus_goal_minutes {
            validate_goal_minutes("weekly_focus_goal_minutes", minutes)?;
        }
        Ok(())
    }
}
