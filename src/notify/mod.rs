mod reminder;

pub use reminder::ReminderHandle;

use crate::constants::MAX_NOTIFICATIONS;
use crate::error::AppError;
use crate::models::{
    Notice, NoticeDraft, NoticeKind, NoticeLog, NoticeSource, NotificationSettings,
    NotificationSettingsPatch, Priority,
};
use crate::store::{lock_store, schema, Store};
use crate::validation::validate_reminder_delay;
use chrono::{Local, NaiveTime};
use log::{debug, error, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// OS-level notification presenter. The real implementation lives in the
/// shell; the core only needs "present title and body, hand back something
/// that can dismiss it".
pub trait NotificationPresenter: Send + Sync {
    fn present(&self, title: &str, body: &str) -> Box<dyn PresentedNotification>;
}

/// Dismiss handle for a presented notification.
pub trait PresentedNotification: Send {
    fn close(self: Box<Self>);
}

/// Presenter that only logs. Used when no OS integration is wired in.
pub struct NoopPresenter;

impl NotificationPresenter for NoopPresenter {
    fn present(&self, title: &str, body: &str) -> Box<dyn PresentedNotification> {
        debug!("notification: {title}: {body}");
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl PresentedNotification for NoopHandle {
    fn close(self: Box<Self>) {}
}

/// System notification log and settings.
///
/// Settings are loaded once at construction (merged over defaults) and kept
/// in memory; every change is persisted. The log holds the most recent
/// notifications, newest first. Storage failures are logged and absorbed.
pub struct NotificationCenter {
    store: Arc<Mutex<Store>>,
    presenter: Arc<dyn NotificationPresenter>,
    settings: Mutex<NotificationSettings>,
}

impl NotificationCenter {
    pub fn new(store: Arc<Mutex<Store>>, presenter: Arc<dyn NotificationPresenter>) -> Self {
        let settings = {
            let guard = lock_store(&store, "NotificationCenter");
            match guard.read_json(schema::KEY_NOTIFICATION_SETTINGS) {
                Ok(Some(settings)) => settings,
                Ok(None) => NotificationSettings::default(),
                Err(e) => {
                    warn!("Failed to load notification settings, using defaults: {e}");
                    NotificationSettings::default()
                }
            }
        };

        Self {
            store,
            presenter,
            settings: Mutex::new(settings),
        }
    }

    /// Record and present a notification.
    ///
    /// Returns `None` without side effects when notifications are globally
    /// disabled or the current local time falls inside quiet hours.
    /// Otherwise the notice is appended to the log (evicting past the cap),
    /// persisted, and handed to the presenter when its kind's toggle allows.
    pub fn show(&self, draft: NoticeDraft) -> Option<Uuid> {
        self.show_at(draft, Local::now().time())
    }

    pub(crate) fn show_at(&self, draft: NoticeDraft, now: NaiveTime) -> Option<Uuid> {
        let settings = self.settings_snapshot();
        if !settings.enabled {
            return None;
        }
        if let Some(window) = settings.quiet_hours {
            if window.contains(now) {
                return None;
            }
        }

        let notice = Notice::from_draft(draft, NoticeSource::System);
        let id = notice.id;
        let kind = notice.kind;
        let title = notice.title.clone();
        let body = notice.message.clone();
        let auto_dismiss_secs = notice.auto_dismiss_secs;

        let mut log = self.load_log();
        log.insert(notice, MAX_NOTIFICATIONS);
        self.save_log(&log);

        if settings.allows(kind) {
            let presented = self.presenter.present(&title, &body);
            match auto_dismiss_secs {
                Some(secs) => {
                    // Detached timer closes the OS notification when it expires
                    std::thread::spawn(move || {
                        std::thread::sleep(Duration::from_secs(u64::from(secs)));
                        presented.close();
                    });
                }
                // Without auto-dismiss the OS notification outlives us;
                // drop the handle.
                None => drop(presented),
            }
        }

        Some(id)
    }

    /// Mark the matching notification read. No-op when absent.
    pub fn mark_read(&self, id: Uuid) {
        let mut log = self.load_log();
        if log.mark_read(id) {
            self.save_log(&log);
        }
    }

    pub fn mark_all_read(&self) {
        let mut log = self.load_log();
        log.mark_all_read();
        self.save_log(&log);
    }

    pub fn clear_all(&self) {
        let mut log = self.load_log();
        log.clear();
        self.save_log(&log);
    }

    /// All retained notifications, newest first.
    pub fn notifications(&self) -> Vec<Notice> {
        self.load_log().notices
    }

    pub fn unread_count(&self) -> usize {
        self.load_log().unread_count()
    }

    pub fn settings(&self) -> NotificationSettings {
        self.settings_snapshot()
    }

    /// Shallow-merge `patch` into the settings and persist the result.
    pub fn update_settings(&self, patch: &NotificationSettingsPatch) -> NotificationSettings {
        let updated = {
            let mut guard = self
                .settings
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            patch.apply(&mut guard);
            guard.clone()
        };

        let store = lock_store(&self.store, "NotificationCenter");
        if let Err(e) = store.write_json(schema::KEY_NOTIFICATION_SETTINGS, &updated) {
            error!("Failed to persist notification settings: {e}");
        }
        updated
    }

    /// Schedule a one-shot focus reminder after `delay`.
    pub fn schedule_focus_reminder(
        self: &Arc<Self>,
        delay: Duration,
    ) -> Result<ReminderHandle, AppError> {
        self.schedule(
            delay,
            NoticeDraft::new(
                NoticeKind::Focus,
                "Time to focus",
                "Your next focus session is ready. Start when you are.",
            )
            .priority(Priority::Medium),
        )
    }

    /// Schedule a one-shot break reminder after `delay`.
    pub fn schedule_break_reminder(
        self: &Arc<Self>,
        delay: Duration,
    ) -> Result<ReminderHandle, AppError> {
        self.schedule(
            delay,
            NoticeDraft::new(
                NoticeKind::Break,
                "Break time",
                "Step away for a few minutes. Your focus will thank you.",
            )
            .priority(Priority::Medium),
        )
    }

    fn schedule(
        self: &Arc<Self>,
        delay: Duration,
        draft: NoticeDraft,
    ) -> Result<ReminderHandle, AppError> {
        validate_reminder_delay(delay)?;
        Ok(reminder::spawn(Arc::clone(self), delay, draft))
    }

    fn settings_snapshot(&self) -> NotificationSettings {
        self.settings
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn load_log(&self) -> NoticeLog {
        let store = lock_store(&self.store, "NotificationCenter");
        match store.read_json(schema::KEY_SYSTEM_LOG) {
            Ok(Some(log)) => log,
            Ok(None) => NoticeLog::default(),
            Err(e) => {
                warn!("Failed to load notification log, starting from empty: {e}");
                NoticeLog::default()
            }
        }
    }

    fn save_log(&self, log: &NoticeLog) {
        let store = lock_store(&self.store, "NotificationCenter");
        if let Err(e) = store.write_json(schema::KEY_SYSTEM_LOG, log) {
            error!("Failed to persist notification log: {e}");
        }
    }
}
