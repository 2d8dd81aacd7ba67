//! Process configuration read from the environment.
use std::env;

use chrono::{Datelike, Utc};

use crate::parser::{ParseOptions, DEFAULT_UTC_OFFSET_HOURS};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Year stamped on battle timestamps; reports only carry month and day.
    pub year: i32,
    pub utc_offset_hours: i32,
    /// Worker threads for batch parsing. 0 uses the rayon default.
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            year: Utc::now().year(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            workers: 0,
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLELOG_BIND` - server bind address (default: `127.0.0.1:3000`)
    /// - `BATTLELOG_YEAR` - battle year (default: current UTC year)
    /// - `BATTLELOG_UTC_OFFSET` - report clock offset in hours (default: 2)
    /// - `BATTLELOG_WORKERS` - batch parse threads (default: 0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bind) = env::var("BATTLELOG_BIND") {
            config.bind_addr = bind;
        }
        if let Some(year) = read_env::<i32>("BATTLELOG_YEAR") {
            config.year = year;
        }
        if let Some(offset) = read_env::<i32>("BATTLELOG_UTC_OFFSET") {
            config.utc_offset_hours = offset.clamp(-23, 23);
        }
        if let Some(workers) = read_env::<usize>("BATTLELOG_WORKERS") {
            config.workers = workers;
        }

        config
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(self.year).with_utc_offset_hours(self.utc_offset_hours)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
