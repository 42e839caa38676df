use crate::constants::DEFAULT_WEEKLY_GOAL_MINUTES;
use crate::error::AppError;
use crate::models::NoticeKind;
use crate::validation::parse_time;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A local-time window during which notifications are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl QuietHours {
    /// Build a window from "HH:MM" strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        Ok(Self {
            start: parse_time(start)?,
            end: parse_time(end)?,
        })
    }

    /// Whether `now` falls inside the window, both endpoints inclusive.
    /// A window whose start is later than its end spans midnight.
    pub fn contains(&self, now: NaiveTime) -> bool {
        if self.start > self.end {
            now >= self.start || now <= self.end
        } else {
            now >= self.start && now <= self.end
        }
    }
}

/// Notification settings singleton, merged over defaults on load and
/// persisted on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub focus_reminders: bool,
    pub break_reminders: bool,
    pub achievements: bool,
    pub insights: bool,
    pub quiet_hours: Option<QuietHours>,
    pub sound: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            focus_reminders: true,
            break_reminders: true,
            achievements: true,
            insights: true,
            quiet_hours: None,
            sound: true,
        }
    }
}

impl NotificationSettings {
    /// Whether notices of `kind` may reach the OS-level presenter.
    /// Status notices (info/warning/error) are only gated by `enabled`.
    pub fn allows(&self, kind: NoticeKind) -> bool {
        match kind {
            NoticeKind::Focus => self.focus_reminders,
            NoticeKind::Break => self.break_reminders,
            NoticeKind::Achievement | NoticeKind::Success => self.achievements,
            NoticeKind::Productivity
            | NoticeKind::Motivation
            | NoticeKind::Health
            | NoticeKind::Schedule
            | NoticeKind::Tip
            | NoticeKind::Suggestion => self.insights,
            NoticeKind::Info | NoticeKind::Warning | NoticeKind::Error => true,
        }
    }
}

/// Partial update for notification settings. `None` leaves a field as-is;
/// `quiet_hours` is doubly optional so the window can be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationSettingsPatch {
    pub enabled: Option<bool>,
    pub focus_reminders: Option<bool>,
    pub break_reminders: Option<bool>,
    pub achievements: Option<bool>,
    pub insights: Option<bool>,
    pub quiet_hours: Option<Option<QuietHours>>,
    pub sound: Option<bool>,
}

impl NotificationSettingsPatch {
    pub fn apply(&self, settings: &mut NotificationSettings) {
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(focus) = self.focus_reminders {
            settings.focus_reminders = focus;
        }
        if let Some(breaks) = self.break_reminders {
            settings.break_reminders = breaks;
        }
        if let Some(achievements) = self.achievements {
            settings.achievements = achievements;
        }
        if let Some(insights) = self.insights {
            settings.insights = insights;
        }
        if let Some(window) = self.quiet_hours {
            settings.quiet_hours = window;
        }
        if let Some(sound) = self.sound {
            settings.sound = sound;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// App settings singleton: appearance, focus durations and goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: Theme,
    pub language: String,
    pub focus_duration_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub daily_focus_goal_minutes: u32,
    pub weekly_focus_goal_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            language: "en".to_string(),
            focus_duration_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            daily_focus_goal_minutes: 120,
            weekly_focus_goal_minutes: DEFAULT_WEEKLY_GOAL_MINUTES,
        }
    }
}

/// Partial update for app settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettingsPatch {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub focus_duration_minutes: Option<u32>,
    pub short_break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub daily_focus_goal_minutes: Option<u32>,
    pub weekly_focus_goal_minutes: Option<u32>,
}

impl AppSettingsPatch {
    pub fn apply(&self, settings: &mut AppSettings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        if let Some(focus) = self.focus_duration_minutes {
            settings.focus_duration_minutes = focus;
        }
        if let Some(short) = self.short_break_minutes {
            settings.short_break_minutes = short;
        }
        if let Some(long) = self.long_break_minutes {
            settings.long_break_minutes = long;
        }
        if let Some(daily) = self.daily_focus_goal_minutes {
            settings.daily_focus_goal_minutes = daily;
        }
        if let Some(weekly) = self.weekly_focus_goal_minutes {
            settings.weekly_focus_goal_minutes = weekly;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_quiet_hours_simple_range() {
        let window = QuietHours::parse("12:00", "14:00").unwrap();

        assert!(window.contains(time(12, 0)));
        assert!(window.contains(time(13, 30)));
        assert!(window.contains(time(14, 0)));
        assert!(!window.contains(time(11, 59)));
        assert!(!window.contains(time(14, 1)));
    }

    #[test]
    fn test_quiet_hours_spanning_midnight() {
        let window = QuietHours::parse("22:00", "08:00").unwrap();

        assert!(window.contains(time(23, 0)));
        assert!(window.contains(time(3, 0)));
        assert!(!window.contains(time(12, 0)));
    }

    #[test]
    fn test_quiet_hours_rejects_bad_times() {
        assert!(QuietHours::parse("25:00", "08:00").is_err());
        assert!(QuietHours::parse("22:00", "8:00").is_err());
    }

    #[test]
    fn test_notification_defaults_enable_everything() {
        let settings = NotificationSettings::default();
        assert!(settings.enabled);
        assert!(settings.quiet_hours.is_none());
        assert!(settings.allows(NoticeKind::Break));
        assert!(settings.allows(NoticeKind::Info));
    }

    #[test]
    fn test_allows_respects_kind_toggles() {
        let settings = NotificationSettings {
            break_reminders: false,
            insights: false,
            ..NotificationSettings::default()
        };

        assert!(!settings.allows(NoticeKind::Break));
        assert!(!settings.allows(NoticeKind::Motivation));
        assert!(settings.allows(NoticeKind::Focus));
        // Status notices are not gated per kind
        assert!(settings.allows(NoticeKind::Error));
    }

    #[test]
    fn test_notification_patch_clears_quiet_hours() {
        let mut settings = NotificationSettings {
            quiet_hours: Some(QuietHours::parse("22:00", "08:00").unwrap()),
            ..NotificationSettings::default()
        };

        let patch = NotificationSettingsPatch {
            quiet_hours: Some(None),
            ..NotificationSettingsPatch::default()
        };
        patch.apply(&mut settings);
        assert!(settings.quiet_hours.is_none());
    }

    #[test]
    fn test_app_settings_merge_over_defaults_on_load() {
        // A stored document missing newer fields picks up their defaults
        let settings: AppSettings = serde_json::from_str(r#"{"language":"fr"}"#).unwrap();
        assert_eq!(settings.language, "fr");
        assert_eq!(settings.focus_duration_minutes, 25);
        assert_eq!(settings.weekly_focus_goal_minutes, DEFAULT_WEEKLY_GOAL_MINUTES);
    }

    #[test]
    fn test_app_settings_patch_is_shallow_merge() {
        let mut settings = AppSettings::default();
        let patch = AppSettingsPatch {
            theme: Some(Theme::Dark),
            daily_focus_goal_minutes: Some(180),
            ..AppSettingsPatch::default()
        };
        patch.apply(&mut settings);

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.daily_focus_goal_minutes, 180);
        assert_eq!(settings.language, "en");
    }
}
