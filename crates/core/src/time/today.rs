use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// First day of the plan.
///
/// An explicit `YYYY-MM-DD` wins. Otherwise the calendar date of `now_utc` in the
/// configured fixed offset (minutes east of UTC), falling back to the machine's
/// local zone.
pub fn resolve_today(
    today_arg: Option<&str>,
    now_utc: DateTime<Utc>,
    utc_offset_minutes: Option<i32>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = today_arg {
        return NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"));
    }

    match utc_offset_minutes {
        Some(minutes) => {
            let offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .with_context(|| format!("invalid UTC offset: {minutes} minutes"))?;
            Ok(now_utc.with_timezone(&offset).date_naive())
        }
        None => Ok(now_utc.with_timezone(&Local).date_naive()),
    }
}
