use crate::domain::allocation::DailyRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of drawing pumped milk out of the freezer stash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StashDay {
    pub date: NaiveDate,
    pub stored_used: f64,
    pub additional_needed: f64,
    /// Stash left after this day.
    pub remaining: f64,
}

/// Feeds each day's pumped-milk requirement from `oz_stored` until it runs out.
pub fn drawdown(records: &[DailyRecord], oz_stored: f64) -> Vec<StashDay> {
    let mut remaining = oz_stored.max(0.0);

    records
        .iter()
        .map(|r| {
            let need = r.pumped_milk.max(0.0);
            let stored_used = need.min(remaining);
            remaining -= stored_used;
            StashDay {
                date: r.date,
                stored_used,
                additional_needed: need - stored_used,
                remaining,
            }
        })
        .collect()
}

/// Last date up to which the stash covers every day's need in full.
pub fn covered_through(days: &[StashDay]) -> Option<NaiveDate> {
    days.iter()
        .take_while(|d| d.additional_needed <= 0.0)
        .last()
        .map(|d| d.date)
}
