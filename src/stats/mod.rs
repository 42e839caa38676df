use crate::constants::PRODUCTIVITY_STEP;
use crate::models::{group_weekly, DailyStats, StatsPatch, StatsSnapshot, WeeklyStats};
use crate::store::{lock_store, schema, Store};
use chrono::{Local, NaiveDate};
use log::{error, warn};
use std::sync::{Arc, Mutex};

/// Daily stats aggregator. Owns the persisted daily record collection; every
/// mutation is a full read-modify-write of the whole collection.
///
/// Storage failures never propagate: reads fall back to an empty collection
/// and writes are logged and dropped, so callers always get a usable record.
pub struct StatsTracker {
    store: Arc<Mutex<Store>>,
}

fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

impl StatsTracker {
    pub fn new(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }

    fn load_records(&self) -> Vec<DailyStats> {
        let store = lock_store(&self.store, "StatsTracker");
        match store.read_json(schema::KEY_DAILY_STATS) {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load daily stats, starting from empty: {e}");
                Vec::new()
            }
        }
    }

    fn save_records(&self, records: &[DailyStats]) {
        let store = lock_store(&self.store, "StatsTracker");
        if let Err(e) = store.write_json(schema::KEY_DAILY_STATS, &records) {
            error!("Failed to persist daily stats: {e}");
        }
    }

    /// Today's record, created zeroed (and persisted) on first access.
    pub fn todays_stats(&self) -> DailyStats {
        self.stats_on(today_local())
    }

    pub(crate) fn stats_on(&self, date: NaiveDate) -> DailyStats {
        let mut records = self.load_records();
        if let Some(existing) = records.iter().find(|r| r.date == date) {
            return existing.clone();
        }
        let fresh = DailyStats::zeroed(date);
        records.push(fresh.clone());
        self.save_records(&records);
        fresh
    }

    /// Merge a partial update into today's record and persist. The
    /// productivity clamp to 0-100 is enforced here, not by callers.
    pub fn update_todays_stats(&self, patch: &StatsPatch) -> DailyStats {
        self.mutate_on(today_local(), |record| patch.apply(record))
    }

    /// Record a finished focus session: adds its minutes, bumps the session
    /// count, and steps productivity up by a fixed amount (clamped at 100).
    pub fn complete_focus_session(&self, duration_minutes: u32) -> DailyStats {
        self.mutate_on(today_local(), |record| {
            record.focus_minutes += duration_minutes;
            record.sessions_completed += 1;
            record.productivity_percent =
                (record.productivity_percent + PRODUCTIVITY_STEP).min(100);
        })
    }

    pub fn add_blocked_distraction(&self) -> DailyStats {
        self.mutate_on(today_local(), |record| {
            record.distractions_blocked += 1;
        })
    }

    pub fn complete_task(&self) -> DailyStats {
        self.mutate_on(today_local(), |record| {
            record.tasks_completed += 1;
        })
    }

    /// Sunday-aligned weekly rollups over all persisted records, newest
    /// week first. Derived on every call, nothing cached.
    pub fn weekly_stats(&self) -> Vec<WeeklyStats> {
        group_weekly(&self.load_records())
    }

    /// Delete every persisted daily record.
    pub fn reset_all_stats(&self) {
        let store = lock_store(&self.store, "StatsTracker");
        if let Err(e) = store.delete(schema::KEY_DAILY_STATS) {
            error!("Failed to reset daily stats: {e}");
        }
    }

    /// Snapshot of today's counters for the insight engine.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot::from(&self.todays_stats())
    }

    fn mutate_on<F>(&self, date: NaiveDate, mutate: F) -> DailyStats
    where
        F: FnOnce(&mut DailyStats),
    {
        let mut records = self.load_records();
        let index = match records.iter().position(|r| r.date == date) {
            Some(index) => index,
            None => {
                records.push(DailyStats::zeroed(date));
                records.len() - 1
            }
        };

        let result = match records.get_mut(index) {
            Some(record) => {
                mutate(record);
                record.productivity_percent = record.productivity_percent.min(100);
                record.clone()
            }
            None => DailyStats::zeroed(date),
        };

        self.save_records(&records);
        result
    }
}
