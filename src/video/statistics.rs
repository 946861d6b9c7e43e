use super::TimestampSource;
use crate::config::TimeZone;
use crate::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};

/// Timing of a recording derived from its frame timestamp stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoStatistics {
    pub fps: f64,
    pub start_time: String,
    pub end_time: String,
}

impl VideoStatistics {
    /// `fps` is the reciprocal of the mean interval between consecutive
    /// frames. Start and end are the first and last timestamp in `zone`.
    pub fn from_timestamps(timestamps: &[f64], zone: TimeZone) -> Result<Self> {
        let (first, last) = match timestamps {
            [first, .., last] => (*first, *last),
            _ => return Err(SummaryError::InsufficientFrames(timestamps.len())),
        };
        if let Some(t) = timestamps.iter().find(|t| !t.is_finite()) {
            return Err(SummaryError::InvalidTimestamps(format!(
                "{t} is not a finite timestamp"
            )));
        }
        let intervals = timestamps.windows(2).map(|w| w[1] - w[0]);
        let mean_interval = intervals.sum::<f64>() / (timestamps.len() - 1) as f64;
        if mean_interval <= 0.0 {
            return Err(SummaryError::InvalidTimestamps(format!(
                "mean frame interval is {mean_interval}"
            )));
        }
        Ok(Self {
            fps: 1.0 / mean_interval,
            start_time: zone.format_timestamp(first)?,
            end_time: zone.format_timestamp(last)?,
        })
    }

    pub fn from_source(source: &mut dyn TimestampSource, zone: TimeZone) -> Result<Self> {
        let timestamps = source.timestamps()?;
        Self::from_timestamps(&timestamps, zone)
    }
}
