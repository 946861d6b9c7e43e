use crate::error::{Result, SummaryError};
use chrono::{FixedOffset, Local, TimeZone as _, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of `start_time`, `end_time` and other civil date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone in which frame timestamps are rendered as civil date-times.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeZone {
    /// Zone of the executing system.
    #[default]
    Local,
    Utc,
    FixedOffset { seconds_east: i32 },
}

impl TimeZone {
    /// Renders seconds since the unix epoch as `YYYY-MM-DD HH:MM:SS` in this
    /// zone. Fractional seconds are truncated, not rounded.
    pub fn format_timestamp(&self, timestamp: f64) -> Result<String> {
        if !timestamp.is_finite() {
            return Err(SummaryError::InvalidTimestamps(format!(
                "{timestamp} is not a finite timestamp"
            )));
        }
        let seconds = timestamp.floor();
        let nanos = (((timestamp - seconds) * 1e9) as u32).min(999_999_999);
        let utc = Utc
            .timestamp_opt(seconds as i64, nanos)
            .single()
            .ok_or_else(|| {
                SummaryError::InvalidTimestamps(format!("{timestamp} is out of range"))
            })?;
        let formatted = match self {
            TimeZone::Local => utc.with_timezone(&Local).format(DATETIME_FORMAT),
            TimeZone::Utc => utc.format(DATETIME_FORMAT),
            TimeZone::FixedOffset { seconds_east } => {
                let offset = FixedOffset::east_opt(*seconds_east)
                    .ok_or(SummaryError::InvalidTimeZone(*seconds_east))?;
                utc.with_timezone(&offset).format(DATETIME_FORMAT)
            }
        };
        Ok(formatted.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub time_zone: TimeZone,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn formats_in_utc_and_truncates_fraction() {
        let formatted = TimeZone::Utc.format_timestamp(1_500_000_000.999).unwrap();
        assert_eq!(formatted, "2017-07-14 02:40:00");
    }

    #[test]
    fn fixed_offset_shifts_wall_clock() {
        let zone = TimeZone::FixedOffset { seconds_east: 2 * 3600 };
        assert_eq!(zone.format_timestamp(0.0).unwrap(), "1970-01-01 02:00:00");
        let zone = TimeZone::FixedOffset { seconds_east: -3600 };
        assert_eq!(zone.format_timestamp(0.5).unwrap(), "1969-12-31 23:00:00");
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let zone = TimeZone::FixedOffset {
            seconds_east: 90_000,
        };
        assert_matches!(
            zone.format_timestamp(0.0),
            Err(SummaryError::InvalidTimeZone(90_000))
        );
    }

    #[test]
    fn rejects_non_finite_timestamp() {
        assert_matches!(
            TimeZone::Utc.format_timestamp(f64::NAN),
            Err(SummaryError::InvalidTimestamps(_))
        );
    }

    #[test]
    fn config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            time_zone: TimeZone::FixedOffset { seconds_east: 3600 },
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_time_zone_defaults_to_local() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.time_zone, TimeZone::Local);
        let config: Config = serde_json::from_str(r#"{"time_zone":"utc"}"#).unwrap();
        assert_eq!(config.time_zone, TimeZone::Utc);
    }
}
