use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which subsystem produced a notice. Insights live in their own bounded
/// log, separate from system notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSource {
    Insight,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Productivity,
    Break,
    Motivation,
    Health,
    Schedule,
    Warning,
    Achievement,
    Tip,
    Suggestion,
    Info,
    Success,
    Error,
    Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// What acting on a notice does. Fixed at creation time so dispatch is an
/// exhaustive match rather than string inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    StartFocus,
    TakeBreak,
    KeepWorking,
    EnableBlocking,
    OpenSettings,
    OpenStatistics,
    OpenPlanner,
    OpenEmail,
    OpenTeam,
    OpenDashboard,
    LearnMore,
    Acknowledge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeAction {
    pub label: String,
    pub action: ActionKind,
    pub primary: bool,
}

/// A generated advisory item: an insight or a system notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub source: NoticeSource,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub actions: Vec<NoticeAction>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub persistent: bool,
    pub auto_dismiss_secs: Option<u32>,
    /// Free-form framing tag carried through to the presentation layer.
    pub psychology_tag: Option<String>,
}

impl Notice {
    pub fn from_draft(draft: NoticeDraft, source: NoticeSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            priority: draft.priority,
            actions: draft.actions,
            created_at: Utc::now(),
            read: false,
            persistent: draft.persistent,
            auto_dismiss_secs: draft.auto_dismiss_secs,
            psychology_tag: draft.psychology_tag,
        }
    }

    pub fn actionable(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// A notice before id/timestamp assignment.
#[derive(Debug, Clone)]
pub struct NoticeDraft {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub actions: Vec<NoticeAction>,
    pub persistent: bool,
    pub auto_dismiss_secs: Option<u32>,
    pub psychology_tag: Option<String>,
}

impl NoticeDraft {
    pub fn new(kind: NoticeKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            priority: Priority::Medium,
            actions: Vec::new(),
            persistent: false,
            auto_dismiss_secs: None,
            psychology_tag: None,
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn action(mut self, label: &str, action: ActionKind, primary: bool) -> Self {
        self.actions.push(NoticeAction {
            label: label.to_string(),
            action,
            primary,
        });
        self
    }
}

/// Bounded, insertion-ordered notice log, newest first. Capacity eviction
/// always drops from the tail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
    pub last_updated: DateTime<Utc>,
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl NoticeLog {
    /// Prepend `fresh` (keeping its order) and truncate to `cap`.
    pub fn prepend(&mut self, fresh: Vec<Notice>, cap: usize) {
        if fresh.is_empty() {
            return;
        }
        self.notices.splice(0..0, fresh);
        self.notices.truncate(cap);
        self.touch();
    }

    pub fn insert(&mut self, notice: Notice, cap: usize) {
        self.prepend(vec![notice], cap);
    }

    /// Flip the read flag on the matching notice. No-op when absent.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.notices.iter_mut().find(|n| n.id == id) {
            Some(notice) => {
                notice.read = true;
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notice in &mut self.notices {
            notice.read = true;
        }
        self.touch();
    }

    /// Remove the matching notice. No-op when absent.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        let removed = self.notices.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.notices.clear();
        self.touch();
    }

    pub fn unread_count(&self) -> usize {
        self.notices.iter().filter(|n| !n.read).count()
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}
