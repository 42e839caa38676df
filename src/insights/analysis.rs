//! Pure productivity analysis over a daily stats snapshot.
//!
//! Every output is a deterministic function of the three input counters;
//! no hidden state, no randomness.

use crate::models::{AppSettings, StatsSnapshot};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusQuality {
    Excellent,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductivityAnalysis {
    pub score: u8,
    pub trend: Trend,
    pub focus_quality: FocusQuality,
    pub stress_level: Level,
    pub energy_level: Level,
    pub burnout_risk: Level,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Composite 0-100 score: up to 40 points for two hours of focus time,
/// 15 per completed session, and up to 20 for blocked distractions.
fn score_for(snapshot: &StatsSnapshot) -> u8 {
    let raw = f64::from(snapshot.focus_minutes) / 120.0 * 40.0
        + f64::from(snapshot.sessions_completed) * 15.0
        + (f64::from(snapshot.distractions_blocked) * 5.0).min(20.0);
    let clamped = raw.round().clamp(0.0, 100.0);
    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "rounded and clamped to 0..=100"
    )]
    let score = clamped as u8;
    score
}

pub fn analyze(snapshot: &StatsSnapshot) -> ProductivityAnalysis {
    let score = score_for(snapshot);
    let focus = snapshot.focus_minutes;
    let sessions = snapshot.sessions_completed;
    let blocked = snapshot.distractions_blocked;

    let trend = if score > 70 {
        Trend::Improving
    } else if score < 40 {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let focus_quality = if score > 80 {
        FocusQuality::Excellent
    } else if score > 60 {
        FocusQuality::Good
    } else if score > 40 {
        FocusQuality::Average
    } else {
        FocusQuality::Poor
    };

    let stress_level = if focus > 240 {
        Level::High
    } else if focus > 120 {
        Level::Medium
    } else {
        Level::Low
    };

    let energy_level = if sessions > 4 {
        Level::High
    } else if sessions > 2 {
        Level::Medium
    } else {
        Level::Low
    };

    let burnout_risk = if focus > 300 {
        Level::High
    } else if focus > 180 {
        Level::Medium
    } else {
        Level::Low
    };

    let mut strengths = Vec::new();
    if sessions > 4 {
        strengths.push("Strong session count today".to_string());
    }
    if focus > 120 {
        strengths.push("Substantial deep-work time".to_string());
    }
    if blocked >= 3 {
        strengths.push("Distraction blocking is doing its job".to_string());
    }

    let mut improvements = Vec::new();
    if sessions <= 2 {
        improvements.push("Fit in a few more focus sessions".to_string());
    }
    if focus <= 60 {
        improvements.push("Aim for at least an hour of focus time".to_string());
    }
    if blocked < 3 {
        improvements.push("Turn on distraction blocking".to_string());
    }

    let mut recommendations = Vec::new();
    if burnout_risk == Level::High {
        recommendations.push("Plan a lighter day tomorrow".to_string());
    }
    if stress_level >= Level::Medium {
        recommendations.push("Schedule regular breaks between sessions".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Keep your current rhythm".to_string());
    }

    ProductivityAnalysis {
        score,
        trend,
        focus_quality,
        stress_level,
        energy_level,
        burnout_risk,
        strengths,
        improvements,
        recommendations,
    }
}

/// Progress toward the configured weekly focus goal, as a 0-100 percent.
pub fn weekly_goal_progress(weekly_focus_minutes: u32, settings: &AppSettings) -> u8 {
    let goal = settings.weekly_focus_goal_minutes.max(1);
    let percent = u64::from(weekly_focus_minutes) * 100 / u64::from(goal);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(focus: u32, sessions: u32, blocked: u32) -> StatsSnapshot {
        StatsSnapshot {
            focus_minutes: focus,
            sessions_completed: sessions,
            distractions_blocked: blocked,
        }
    }

    #[test]
    fn test_score_clamps_to_range() {
        assert_eq!(score_for(&snapshot(0, 0, 0)), 0);
        assert_eq!(score_for(&snapshot(1000, 50, 50)), 100);
    }

    #[test]
    fn test_score_distraction_bonus_capped_at_20() {
        // 10 blocked would be 50 points uncapped
        assert_eq!(score_for(&snapshot(0, 0, 10)), 20);
    }

    #[test]
    fn test_reference_analysis_is_deterministic() {
        // 150/120*40 + 5*15 + min(2*5, 20) = 50 + 75 + 10, clamped to 100
        let analysis = analyze(&snapshot(150, 5, 2));

        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.trend, Trend::Improving);
        assert_eq!(analysis.focus_quality, FocusQuality::Excellent);
        assert_eq!(analysis.energy_level, Level::High);

        assert_eq!(analysis, analyze(&snapshot(150, 5, 2)));
    }

    #[test]
    fn test_zero_day_is_declining() {
        let analysis = analyze(&snapshot(0, 0, 0));
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.trend, Trend::Declining);
        assert_eq!(analysis.focus_quality, FocusQuality::Poor);
        assert_eq!(analysis.energy_level, Level::Low);
        assert_eq!(analysis.burnout_risk, Level::Low);
        assert!(!analysis.improvements.is_empty());
    }

    #[test]
    fn test_heavy_day_flags_burnout() {
        let analysis = analyze(&snapshot(320, 8, 5));
        assert_eq!(analysis.stress_level, Level::High);
        assert_eq!(analysis.burnout_risk, Level::High);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("lighter day")));
    }

    #[test]
    fn test_middling_day_is_stable() {
        // 60/120*40 + 2*15 + 0 = 50
        let analysis = analyze(&snapshot(60, 2, 0));
        assert_eq!(analysis.score, 50);
        assert_eq!(analysis.trend, Trend::Stable);
        assert_eq!(analysis.focus_quality, FocusQuality::Average);
    }

    #[test]
    fn test_weekly_goal_progress_uses_configured_goal() {
        let mut settings = AppSettings::default();
        assert_eq!(weekly_goal_progress(300, &settings), 50);
        assert_eq!(weekly_goal_progress(900, &settings), 100);

        settings.weekly_focus_goal_minutes = 300;
        assert_eq!(weekly_goal_progress(300, &settings), 100);
        assert_eq!(weekly_goal_progress(75, &settings), 25);
    }
}
