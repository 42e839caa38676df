pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

// Named document keys. One JSON document per key; collection mutations
// rewrite the whole document, so the last writer wins.

/// All persisted daily stat records, as one array document.
pub const KEY_DAILY_STATS: &str = "daily_stats";

/// Bounded insight log (coach-generated notices).
pub const KEY_INSIGHT_LOG: &str = "notices.insights";

/// Bounded system notification log.
pub const KEY_SYSTEM_LOG: &str = "notices.system";

/// Notification settings singleton.
pub const KEY_NOTIFICATION_SETTINGS: &str = "notification_settings";

/// App settings singleton.
pub const KEY_APP_SETTINGS: &str = "app_settings";
