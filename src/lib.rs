//! Tracking summaries for fly courtship videos.
//!
//! A [`TrackingSummary`] holds the acquisition and tracking parameters of one
//! video together with per-frame behavior flags, derives the video timing from
//! the movie's frame timestamps and persists as JSON.

pub mod config;
pub mod error;
pub mod tracking;
pub mod video;

pub use config::{Config, TimeZone};
pub use error::{Result, SummaryError};
pub use tracking::{Attribute, AttributeValue, MetaValue, TrackingSummary};
pub use video::{TimestampSource, VideoStatistics};
