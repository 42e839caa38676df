/// Maximum retained insights (newest first, oldest evicted)
pub const MAX_INSIGHTS: usize = 20;

/// Maximum retained system notifications (newest first, oldest evicted)
pub const MAX_NOTIFICATIONS: usize = 50;

/// Productivity percent gained per completed focus session
pub const PRODUCTIVITY_STEP: u8 = 5;

/// Focus minutes after which a break is recommended
pub const BREAK_THRESHOLD_MINUTES: u32 = 120;

/// Distractions-blocked count below which enabling blocking is suggested
pub const BLOCKING_SUGGESTION_THRESHOLD: u32 = 3;

/// Default weekly focus goal in minutes
pub const DEFAULT_WEEKLY_GOAL_MINUTES: u32 = 600;

/// Maximum focus session length in minutes (24 hours)
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

/// Maximum one-shot reminder delay (24 hours)
pub const MAX_REMINDER_DELAY_SECS: u64 = 24 * 60 * 60;

/// Default coach refresh interval in seconds (30 minutes)
pub const COACH_REFRESH_INTERVAL_SECS: u64 = 30 * 60;
