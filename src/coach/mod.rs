use crate::constants::COACH_REFRESH_INTERVAL_SECS;
use crate::insights::InsightEngine;
use crate::models::{ActionKind, Notice, NoticeDraft, NoticeKind};
use crate::notify::NotificationCenter;
use crate::stats::StatsTracker;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use uuid::Uuid;

/// Page navigation collaborator. The real implementation lives in the shell.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only logs. Used when no shell is wired in.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        debug!("navigate: {path}");
    }
}

pub struct CoachConfig {
    pub refresh_interval_secs: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: COACH_REFRESH_INTERVAL_SECS,
        }
    }
}

/// Coach presentation shell: refreshes the insight engine from the latest
/// stats snapshot on a fixed interval, and holds a cursor into the current
/// insight list for prev/next/dismiss plus action dispatch.
pub struct CoachService {
    stats: Arc<StatsTracker>,
    insights: Arc<InsightEngine>,
    notifications: Arc<NotificationCenter>,
    navigator: Arc<dyn Navigator>,
    config: CoachConfig,
    running: Arc<AtomicBool>,
    cursor: Mutex<Cursor>,
}

#[derive(Default)]
struct Cursor {
    list: Vec<Notice>,
    index: usize,
}

impl CoachService {
    pub fn new(
        stats: Arc<StatsTracker>,
        insights: Arc<InsightEngine>,
        notifications: Arc<NotificationCenter>,
        navigator: Arc<dyn Navigator>,
        config: CoachConfig,
    ) -> Self {
        Self {
            stats,
            insights,
            notifications,
            navigator,
            config,
            running: Arc::new(AtomicBool::new(false)),
            cursor: Mutex::new(Cursor::default()),
        }
    }

    /// Start the background refresh loop. One refresh runs immediately;
    /// later refreshes follow at the configured interval until `stop`.
    pub fn start(&self) -> JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let stats = Arc::clone(&self.stats);
        let insights = Arc::clone(&self.insights);
        let interval = Duration::from_secs(self.config.refresh_interval_secs);

        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                let snapshot = stats.snapshot();
                insights.refresh(&snapshot);
                wait_interval(&running, interval);
            }
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Reload the cursor list from the insight log, resetting to the front.
    pub fn reload(&self) {
        let list = self.insights.insights();
        let mut cursor = self.lock_cursor();
        cursor.list = list;
        cursor.index = 0;
    }

    pub fn current(&self) -> Option<Notice> {
        let cursor = self.lock_cursor();
        cursor.list.get(cursor.index).cloned()
    }

    /// Advance to the next insight, wrapping at the end.
    pub fn next(&self) -> Option<Notice> {
        let mut cursor = self.lock_cursor();
        if cursor.list.is_empty() {
            return None;
        }
        cursor.index = (cursor.index + 1) % cursor.list.len();
        cursor.list.get(cursor.index).cloned()
    }

    /// Step back to the previous insight, wrapping at the front.
    pub fn prev(&self) -> Option<Notice> {
        let mut cursor = self.lock_cursor();
        if cursor.list.is_empty() {
            return None;
        }
        cursor.index = match cursor.index {
            0 => cursor.list.len() - 1,
            index => index - 1,
        };
        cursor.list.get(cursor.index).cloned()
    }

    /// Dismiss the insight under the cursor, removing it from the log and
    /// advancing to the next one. Returns the dismissed id.
    pub fn dismiss_current(&self) -> Option<Uuid> {
        let mut cursor = self.lock_cursor();
        if cursor.index >= cursor.list.len() {
            return None;
        }
        let index = cursor.index;
        let id = cursor.list.remove(index).id;
        if cursor.index >= cursor.list.len() {
            cursor.index = 0;
        }
        drop(cursor);

        self.insights.dismiss(id);
        Some(id)
    }

    /// Dispatch a chosen action: navigate when the action targets a page,
    /// otherwise confirm completion through the notification center.
    pub fn act(&self, action: ActionKind) {
        match route_for(action) {
            Some(path) => self.navigator.navigate(path),
            None => {
                self.notifications.show(NoticeDraft::new(
                    NoticeKind::Success,
                    "Done",
                    "Action completed.",
                ));
            }
        }
    }

    fn lock_cursor(&self) -> std::sync::MutexGuard<'_, Cursor> {
        self.cursor
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Navigation target for each action kind; `None` completes in place.
fn route_for(action: ActionKind) -> Option<&'static str> {
    match action {
        ActionKind::StartFocus => Some("/focus"),
        ActionKind::TakeBreak => Some("/break"),
        ActionKind::EnableBlocking => Some("/settings/blocking"),
        ActionKind::OpenSettings => Some("/settings"),
        ActionKind::OpenStatistics => Some("/statistics"),
        ActionKind::OpenPlanner => Some("/planner"),
        ActionKind::OpenEmail => Some("/email"),
        ActionKind::OpenTeam => Some("/team"),
        ActionKind::OpenDashboard => Some("/"),
        ActionKind::LearnMore => Some("/help"),
        ActionKind::KeepWorking | ActionKind::Acknowledge => None,
    }
}

fn wait_interval(running: &AtomicBool, interval: Duration) {
    const STEP: Duration = Duration::from_millis(100);
    let mut waited = Duration::ZERO;
    while running.load(Ordering::SeqCst) && waited < interval {
        let step = STEP.min(interval - waited);
        thread::sleep(step);
        waited += step;
    }
}
