pub mod domain;
pub mod time;

pub mod config {
    use anyhow::Context;

    const DEFAULT_MAX_RANGE_DAYS: i64 = 3660;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        /// Minutes east of UTC used to decide "today". Local zone when unset.
        pub utc_offset_minutes: Option<i32>,
        pub max_range_days: i64,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let utc_offset_minutes = match std::env::var("MILKPLAN_UTC_OFFSET_MINUTES") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<i32>()
                        .context("MILKPLAN_UTC_OFFSET_MINUTES must be an integer")?,
                ),
                Err(_) => None,
            };

            let max_range_days = match std::env::var("MILKPLAN_MAX_RANGE_DAYS") {
                Ok(s) => s
                    .trim()
                    .parse::<i64>()
                    .context("MILKPLAN_MAX_RANGE_DAYS must be an integer")?,
                Err(_) => DEFAULT_MAX_RANGE_DAYS,
            };
            anyhow::ensure!(
                max_range_days >= 1,
                "MILKPLAN_MAX_RANGE_DAYS must be >= 1 (got {max_range_days})"
            );

            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                utc_offset_minutes,
                max_range_days,
            })
        }
    }
}
