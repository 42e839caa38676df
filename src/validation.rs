use crate::constants::{MAX_REMINDER_DELAY_SECS, MAX_SESSION_MINUTES};
use crate::error::AppError;
use chrono::NaiveTime;
use std::time::Duration;

/// Validate a focus session length in minutes.
pub fn validate_session_minutes(minutes: u32) -> Result<(), AppError> {
    if minutes == 0 {
        return Err(AppError::InvalidInput {
            field: "duration_minutes",
            reason: "must be positive".into(),
        });
    }
    if minutes > MAX_SESSION_MINUTES {
        return Err(AppError::InvalidInput {
            field: "duration_minutes",
            reason: format!("cannot exceed {MAX_SESSION_MINUTES} minutes"),
        });
    }
    Ok(())
}

/// Validate a one-shot reminder delay.
pub fn validate_reminder_delay(delay: Duration) -> Result<(), AppError> {
    if delay.is_zero() {
        return Err(AppError::InvalidInput {
            field: "delay",
            reason: "must be positive".into(),
        });
    }
    if delay.as_secs() > MAX_REMINDER_DELAY_SECS {
        return Err(AppError::InvalidInput {
            field: "delay",
            reason: "cannot exceed 24 hours".into(),
        });
    }
    Ok(())
}

/// Validate a daily or weekly focus goal in minutes.
pub fn validate_goal_minutes(field: &'static str, minutes: u32) -> Result<(), AppError> {
    if minutes == 0 {
        return Err(AppError::InvalidInput {
            field,
            reason: "must be positive".into(),
        });
    }
    if minutes > 7 * MAX_SESSION_MINUTES {
        return Err(AppError::InvalidInput {
            field,
            reason: "cannot exceed one week of minutes".into(),
        });
    }
    Ok(())
}

/// Parse a time in strict HH:MM, 24-hour format.
pub fn parse_time(text: &str) -> Result<NaiveTime, AppError> {
    let err = |reason: &str| AppError::InvalidInput {
        field: "time",
        reason: reason.into(),
    };

    if text.len() != 5 {
        return Err(err("must be in HH:MM format"));
    }
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| err("must be in HH:MM format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_minutes_valid() {
        assert!(validate_session_minutes(25).is_ok());
        assert!(validate_session_minutes(MAX_SESSION_MINUTES).is_ok());
    }

    #[test]
    fn test_validate_session_minutes_zero() {
        assert!(validate_session_minutes(0).is_err());
    }

    #[test]
    fn test_validate_session_minutes_too_large() {
        assert!(validate_session_minutes(MAX_SESSION_MINUTES + 1).is_err());
    }

    #[test]
    fn test_validate_reminder_delay() {
        assert!(validate_reminder_delay(Duration::from_secs(60)).is_ok());
        assert!(validate_reminder_delay(Duration::ZERO).is_err());
        assert!(validate_reminder_delay(Duration::from_secs(MAX_REMINDER_DELAY_SECS + 1)).is_err());
    }

    #[test]
    fn test_validate_goal_minutes() {
        assert!(validate_goal_minutes("weekly_focus_goal_minutes", 600).is_ok());
        assert!(validate_goal_minutes("weekly_focus_goal_minutes", 0).is_err());
    }

    #[test]
    fn test_parse_time_valid() {
        assert!(parse_time("09:00").is_ok());
        assert!(parse_time("23:59").is_ok());
        assert!(parse_time("00:00").is_ok());
    }

    #[test]
    fn test_parse_time_invalid() {
        assert!(parse_time("9:00").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("12-30").is_err());
    }
}
