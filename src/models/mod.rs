pub mod daily_stats;
pub mod notice;
pub mod settings;
pub mod team;

pub use daily_stats::{group_weekly, week_start, DailyStats, StatsPatch, StatsSnapshot, WeeklyStats};
pub use notice::{ActionKind, Notice, NoticeAction, NoticeDraft, NoticeKind, NoticeLog, NoticeSource, Priority};
pub use settings::{
    AppSettings, AppSettingsPatch, NotificationSettings, NotificationSettingsPatch, QuietHours, Theme,
};
pub use team::{Friend, FriendStatus, SharedSession};
