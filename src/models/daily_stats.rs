use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregated productivity counters for one local calendar date.
///
/// Owned exclusively by the stats tracker; all counters only grow within a
/// day, and `productivity_percent` is clamped to 0-100 at the mutation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub focus_minutes: u32,
    pub sessions_completed: u32,
    pub productivity_percent: u8,
    pub distractions_blocked: u32,
    pub tasks_completed: u32,
}

impl DailyStats {
    pub fn zeroed(date: NaiveDate) -> Self {
        Self {
            date,
            focus_minutes: 0,
            sessions_completed: 0,
            productivity_percent: 0,
            distractions_blocked: 0,
            tasks_completed: 0,
        }
    }
}

/// Partial update for a single day's counters. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsPatch {
    pub focus_minutes: Option<u32>,
    pub sessions_completed: Option<u32>,
    pub productivity_percent: Option<u8>,
    pub distractions_blocked: Option<u32>,
    pub tasks_completed: Option<u32>,
}

impl StatsPatch {
    pub fn apply(&self, stats: &mut DailyStats) {
        if let Some(focus) = self.focus_minutes {
            stats.focus_minutes = focus;
        }
        if let Some(sessions) = self.sessions_completed {
            stats.sessions_completed = sessions;
        }
        if let Some(percent) = self.productivity_percent {
            stats.productivity_percent = percent.min(100);
        }
        if let Some(blocked) = self.distractions_blocked {
            stats.distractions_blocked = blocked;
        }
        if let Some(tasks) = self.tasks_completed {
            stats.tasks_completed = tasks;
        }
    }
}

/// The counters the insight rules and productivity analysis read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub focus_minutes: u32,
    pub sessions_completed: u32,
    pub distractions_blocked: u32,
}

impl From<&DailyStats> for StatsSnapshot {
    fn from(stats: &DailyStats) -> Self {
        Self {
            focus_minutes: stats.focus_minutes,
            sessions_completed: stats.sessions_completed,
            distractions_blocked: stats.distractions_blocked,
        }
    }
}

/// Derived weekly rollup. Never stored; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub total_focus_minutes: u32,
    pub total_sessions: u32,
    pub avg_productivity_percent: u8,
    pub total_distractions_blocked: u32,
    pub total_tasks_completed: u32,
    pub days_active: u32,
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

/// Group daily records into Sunday-aligned weekly rollups, newest week first.
///
/// Counters are summed; productivity is averaged over the days present in
/// each week (rounded to the nearest percent).
pub fn group_weekly(records: &[DailyStats]) -> Vec<WeeklyStats> {
    use std::collections::BTreeMap;

    let mut weeks: BTreeMap<NaiveDate, Vec<&DailyStats>> = BTreeMap::new();
    for record in records {
        weeks.entry(week_start(record.date)).or_default().push(record);
    }

    weeks
        .into_iter()
        .rev()
        .map(|(start, days)| {
            let mut rollup = WeeklyStats {
                week_start: start,
                total_focus_minutes: 0,
                total_sessions: 0,
                avg_productivity_percent: 0,
                total_distractions_blocked: 0,
                total_tasks_completed: 0,
                days_active: 0,
            };
            let mut productivity_sum: u32 = 0;
            for day in days {
                rollup.total_focus_minutes += day.focus_minutes;
                rollup.total_sessions += day.sessions_completed;
                rollup.total_distractions_blocked += day.distractions_blocked;
                rollup.total_tasks_completed += day.tasks_completed;
                productivity_sum += u32::from(day.productivity_percent);
                rollup.days_active += 1;
            }
            if rollup.days_active > 0 {
                let avg = (productivity_sum + rollup.days_active / 2) / rollup.days_active;
                rollup.avg_productivity_percent = u8::try_from(avg).unwrap_or(100);
            }
            rollup
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zeroed_record() {
        let stats = DailyStats::zeroed(date(2024, 3, 11));
        assert_eq!(stats.focus_minutes, 0);
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.productivity_percent, 0);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut stats = DailyStats::zeroed(date(2024, 3, 11));
        stats.focus_minutes = 30;

        let patch = StatsPatch {
            sessions_completed: Some(2),
            ..StatsPatch::default()
        };
        patch.apply(&mut stats);

        assert_eq!(stats.focus_minutes, 30);
        assert_eq!(stats.sessions_completed, 2);
    }

    #[test]
    fn test_patch_clamps_productivity() {
        let mut stats = DailyStats::zeroed(date(2024, 3, 11));
        let patch = StatsPatch {
            productivity_percent: Some(250),
            ..StatsPatch::default()
        };
        patch.apply(&mut stats);
        assert_eq!(stats.productivity_percent, 100);
    }

    #[test]
    fn test_week_start_aligns_to_sunday() {
        // 2024-03-11 is a Monday; the preceding Sunday is 2024-03-10
        assert_eq!(week_start(date(2024, 3, 11)), date(2024, 3, 10));
        // A Sunday maps to itself
        assert_eq!(week_start(date(2024, 3, 10)), date(2024, 3, 10));
        // A Saturday maps back six days
        assert_eq!(week_start(date(2024, 3, 16)), date(2024, 3, 10));
    }

    #[test]
    fn test_group_weekly_sums_and_averages() {
        let mut monday = DailyStats::zeroed(date(2024, 3, 11));
        monday.focus_minutes = 60;
        monday.sessions_completed = 2;
        monday.productivity_percent = 40;

        let mut tuesday = DailyStats::zeroed(date(2024, 3, 12));
        tuesday.focus_minutes = 90;
        tuesday.sessions_completed = 3;
        tuesday.productivity_percent = 61;

        let weeks = group_weekly(&[monday, tuesday]);
        assert_eq!(weeks.len(), 1);
        let week = weeks.first().unwrap();
        assert_eq!(week.week_start, date(2024, 3, 10));
        assert_eq!(week.total_focus_minutes, 150);
        assert_eq!(week.total_sessions, 5);
        assert_eq!(week.avg_productivity_percent, 51); // round(101 / 2)
        assert_eq!(week.days_active, 2);
    }

    #[test]
    fn test_group_weekly_sorts_newest_first() {
        let old = DailyStats::zeroed(date(2024, 3, 4));
        let recent = DailyStats::zeroed(date(2024, 3, 12));

        let weeks = group_weekly(&[old, recent]);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks.first().unwrap().week_start, date(2024, 3, 10));
        assert_eq!(weeks.get(1).unwrap().week_start, date(2024, 3, 3));
    }

    #[test]
    fn test_group_weekly_conserves_focus_time() {
        let records: Vec<DailyStats> = (1..=28)
            .map(|day| {
                let mut stats = DailyStats::zeroed(date(2024, 3, day));
                stats.focus_minutes = day * 10;
                stats
            })
            .collect();

        let daily_total: u32 = records.iter().map(|r| r.focus_minutes).sum();
        let weeks = group_weekly(&records);
        let weekly_total: u32 = weeks.iter().map(|w| w.total_focus_minutes).sum();
        assert_eq!(daily_total, weekly_total);
    }

    #[test]
    fn test_group_weekly_idempotent() {
        let mut day = DailyStats::zeroed(date(2024, 3, 11));
        day.focus_minutes = 45;
        let records = vec![day];

        assert_eq!(group_weekly(&records), group_weekly(&records));
    }

    #[test]
    fn test_date_serializes_as_iso_day() {
        let stats = DailyStats::zeroed(date(2024, 3, 11));
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"2024-03-11\""));
    }
}
