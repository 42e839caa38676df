pub mod analysis;

use crate::constants::{BLOCKING_SUGGESTION_THRESHOLD, BREAK_THRESHOLD_MINUTES, MAX_INSIGHTS};
use crate::models::{
    ActionKind, Notice, NoticeDraft, NoticeKind, NoticeLog, NoticeSource, Priority, StatsSnapshot,
};
use crate::store::{lock_store, schema, Store};
use log::{error, warn};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Threshold rule engine producing coach insights from a stats snapshot,
/// plus the bounded insight log it maintains.
///
/// Rules are independent: every applicable rule fires in the same pass, each
/// emitting a freshly-timed, unread notice. Storage failures never
/// propagate; the log degrades to empty.
pub struct InsightEngine {
    store: Arc<Mutex<Store>>,
}

impl InsightEngine {
    pub fn new(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }

    /// Evaluate the rules against `snapshot`. Pure: no log access, no
    /// persistence.
    pub fn generate(snapshot: &StatsSnapshot) -> Vec<Notice> {
        let mut notices = Vec::new();

        if snapshot.sessions_completed > 0 {
            let sessions = snapshot.sessions_completed;
            let message = if sessions == 1 {
                "You've completed a focus session today. Keep the momentum going!".to_string()
            } else {
                format!("You've completed {sessions} focus sessions today. Keep the momentum going!")
            };
            notices.push(Notice::from_draft(
                NoticeDraft::new(NoticeKind::Motivation, "Great momentum", &message)
                    .priority(Priority::Medium)
                    .action("Keep going", ActionKind::KeepWorking, true)
                    .action("View stats", ActionKind::OpenStatistics, false),
                NoticeSource::Insight,
            ));
        }

        if snapshot.focus_minutes > BREAK_THRESHOLD_MINUTES {
            let minutes = snapshot.focus_minutes;
            notices.push(Notice::from_draft(
                NoticeDraft::new(
                    NoticeKind::Break,
                    "Time for a break",
                    &format!(
                        "You've focused for {minutes} minutes today. A short break helps you stay sharp."
                    ),
                )
                .priority(Priority::High)
                .action("Take a break", ActionKind::TakeBreak, true)
                .action("Continue working", ActionKind::KeepWorking, false),
                NoticeSource::Insight,
            ));
        }

        if snapshot.distractions_blocked < BLOCKING_SUGGESTION_THRESHOLD {
            let blocked = snapshot.distractions_blocked;
            notices.push(Notice::from_draft(
                NoticeDraft::new(
                    NoticeKind::Productivity,
                    "Protect your focus",
                    &format!(
                        "Only {blocked} distractions blocked today. Blocking keeps interruptions out of your sessions."
                    ),
                )
                .priority(Priority::Medium)
                .action("Enable blocking", ActionKind::EnableBlocking, true)
                .action("Learn more", ActionKind::LearnMore, false),
                NoticeSource::Insight,
            ));
        }

        notices
    }

    /// Generate from `snapshot`, prepend to the persisted log (truncated to
    /// the insight cap) and return the newly generated notices.
    pub fn refresh(&self, snapshot: &StatsSnapshot) -> Vec<Notice> {
        let fresh = Self::generate(snapshot);
        if !fresh.is_empty() {
            let mut log = self.load_log();
            log.prepend(fresh.clone(), MAX_INSIGHTS);
            self.save_log(&log);
        }
        fresh
    }

    /// All retained insights, newest first.
    pub fn insights(&self) -> Vec<Notice> {
        self.load_log().notices
    }

    pub fn unread_insights(&self) -> Vec<Notice> {
        self.load_log()
            .notices
            .into_iter()
            .filter(|n| !n.read)
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.load_log().unread_count()
    }

    /// Mark the matching insight read. No-op when absent.
    pub fn mark_read(&self, id: Uuid) {
        let mut log = self.load_log();
        if log.mark_read(id) {
            self.save_log(&log);
        }
    }

    /// Remove the matching insight. No-op when absent.
    pub fn dismiss(&self, id: Uuid) {
        let mut log = self.load_log();
        if log.dismiss(id) {
            self.save_log(&log);
        }
    }

    pub fn clear(&self) {
        let mut log = self.load_log();
        log.clear();
        self.save_log(&log);
    }

    fn load_log(&self) -> NoticeLog {
        let store = lock_store(&self.store, "InsightEngine");
        match store.read_json(schema::KEY_INSIGHT_LOG) {
            Ok(Some(log)) => log,
            Ok(None) => NoticeLog::default(),
            Err(e) => {
                warn!("Failed to load insight log, starting from empty: {e}");
                NoticeLog::default()
            }
        }
    }

    fn save_log(&self, log: &NoticeLog) {
        let store = lock_store(&self.store, "InsightEngine");
        if let Err(e) = store.write_json(schema::KEY_INSIGHT_LOG, log) {
            error!("Failed to persist insight log: {e}");
        }
    }
}
