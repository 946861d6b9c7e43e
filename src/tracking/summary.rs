use super::attributes::{parse_attributes, Attribute, AttributeValue, Behaviors, Kind};
use super::meta::{ArenaMeta, MetaValue, SoftwareTrackingMeta, VideoMeta};
use crate::config::TimeZone;
use crate::error::{Result, SummaryError};
use crate::video::{self, TimestampSource, VideoStatistics};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Holds information about one tracked video.
///
/// Every field starts unset. `fps`, `start_time` and `end_time` are derived
/// from `video_file` whenever [`TrackingSummary::set_attributes`] sees a video
/// that exists. Each entry of `behaviors` flags, per frame, whether that
/// behavior was observed; all entries are expected to share the video's frame
/// count (see [`TrackingSummary::check_behaviors`]).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TrackingSummary {
    pub video_file: Option<String>,
    pub fps: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub arena_type: Option<String>,
    pub arena_size_mm: Option<f64>,
    pub pixels_per_mm: Option<f64>,
    pub group: Option<String>,
    pub tight_threshold: Option<f64>,
    pub loose_threshold: Option<f64>,
    /// When tracking took place, not when the video was recorded.
    pub date_tracked: Option<String>,
    pub tracking_software: Option<String>,
    pub behaviors: Behaviors,
    #[serde(skip)]
    time_zone: TimeZone,
}

impl TrackingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn set_time_zone(&mut self, time_zone: TimeZone) {
        self.time_zone = time_zone;
    }

    pub fn time_zone(&self) -> TimeZone {
        self.time_zone
    }

    fn text_slot(&mut self, attribute: Attribute) -> Option<&mut Option<String>> {
        match attribute {
            Attribute::VideoFile => Some(&mut self.video_file),
            Attribute::StartTime => Some(&mut self.start_time),
            Attribute::EndTime => Some(&mut self.end_time),
            Attribute::ArenaType => Some(&mut self.arena_type),
            Attribute::Group => Some(&mut self.group),
            Attribute::DateTracked => Some(&mut self.date_tracked),
            Attribute::TrackingSoftware => Some(&mut self.tracking_software),
            _ => None,
        }
    }

    fn number_slot(&mut self, attribute: Attribute) -> Option<&mut Option<f64>> {
        match attribute {
            Attribute::Fps => Some(&mut self.fps),
            Attribute::ArenaSizeMm => Some(&mut self.arena_size_mm),
            Attribute::PixelsPerMm => Some(&mut self.pixels_per_mm),
            Attribute::TightThreshold => Some(&mut self.tight_threshold),
            Attribute::LooseThreshold => Some(&mut self.loose_threshold),
            _ => None,
        }
    }

    pub fn get(&self, attribute: Attribute) -> AttributeValue {
        match attribute {
            Attribute::VideoFile => AttributeValue::Text(self.video_file.clone()),
            Attribute::Fps => AttributeValue::Number(self.fps),
            Attribute::StartTime => AttributeValue::Text(self.start_time.clone()),
            Attribute::EndTime => AttributeValue::Text(self.end_time.clone()),
            Attribute::ArenaType => AttributeValue::Text(self.arena_type.clone()),
            Attribute::ArenaSizeMm => AttributeValue::Number(self.arena_size_mm),
            Attribute::PixelsPerMm => AttributeValue::Number(self.pixels_per_mm),
            Attribute::Group => AttributeValue::Text(self.group.clone()),
            Attribute::TightThreshold => AttributeValue::Number(self.tight_threshold),
            Attribute::LooseThreshold => AttributeValue::Number(self.loose_threshold),
            Attribute::DateTracked => AttributeValue::Text(self.date_tracked.clone()),
            Attribute::TrackingSoftware => AttributeValue::Text(self.tracking_software.clone()),
            Attribute::Behaviors => AttributeValue::Behaviors(self.behaviors.clone()),
        }
    }

    /// Overwrites a single attribute. Does not trigger video derivation.
    pub fn set(&mut self, attribute: Attribute, value: AttributeValue) -> Result<()> {
        match (attribute.kind(), value) {
            (Kind::Text, AttributeValue::Text(text)) => {
                if let Some(slot) = self.text_slot(attribute) {
                    *slot = text;
                }
            }
            (Kind::Number, AttributeValue::Number(number)) => {
                if let Some(slot) = self.number_slot(attribute) {
                    *slot = number;
                }
            }
            (Kind::Behaviors, AttributeValue::Behaviors(behaviors)) => {
                self.behaviors = behaviors;
            }
            (kind, _) => {
                return Err(SummaryError::InvalidValue {
                    attribute: attribute.name(),
                    expected: match kind {
                        Kind::Text => "a text value",
                        Kind::Number => "a numeric value",
                        Kind::Behaviors => "behavior flags",
                    },
                })
            }
        }
        Ok(())
    }

    /// Snapshot of all session metadata, keyed and sorted by attribute name.
    /// Behaviors and bookkeeping are left out.
    pub fn get_meta_data(&self) -> BTreeMap<&'static str, MetaValue> {
        Attribute::ALL
            .into_iter()
            .filter(|a| a.is_metadata())
            .map(|a| (a.name(), MetaValue::from(self.get(a))))
            .collect()
    }

    /// Sets some or all attributes at once.
    ///
    /// If `video_file` ends up pointing at an existing file, `fps`,
    /// `start_time` and `end_time` are re-derived from it and overwrite
    /// whatever was passed in. Changes are staged on a copy and committed only
    /// when validation and derivation both succeed, so a failed call leaves
    /// the summary untouched.
    pub fn set_attributes(&mut self, values: &Map<String, Value>) -> Result<()> {
        let mut staged = self.clone();
        for (attribute, value) in parse_attributes(values)? {
            staged.set(attribute, value)?;
        }
        let has_video = staged
            .video_file
            .as_deref()
            .map_or(false, |path| Path::new(path).exists());
        if has_video {
            staged.apply_video_statistics()?;
        }
        *self = staged;
        Ok(())
    }

    /// Derives fps and start/end time from `video_file` without modifying the
    /// summary.
    pub fn compute_video_statistics(&self) -> Result<VideoStatistics> {
        let path = self.video_file.as_deref().ok_or(SummaryError::NoVideoFile)?;
        let mut source = video::open(Path::new(path))?;
        VideoStatistics::from_source(source.as_mut(), self.time_zone)
    }

    pub fn compute_video_statistics_from(
        &self,
        source: &mut dyn TimestampSource,
    ) -> Result<VideoStatistics> {
        VideoStatistics::from_source(source, self.time_zone)
    }

    /// Runs [`compute_video_statistics`](Self::compute_video_statistics) and
    /// stores the result.
    pub fn apply_video_statistics(&mut self) -> Result<VideoStatistics> {
        let stats = self.compute_video_statistics()?;
        self.fps = Some(stats.fps);
        self.start_time = Some(stats.start_time.clone());
        self.end_time = Some(stats.end_time.clone());
        Ok(stats)
    }

    pub fn describe(&self) -> String {
        let mut description = String::from("Tracking Summary\n----------------");
        for (name, value) in self.get_meta_data() {
            description.push_str(&format!("\n{name}: {value}"));
        }
        description
    }

    pub fn video_meta(&self) -> VideoMeta {
        VideoMeta {
            video_file: self.video_file.clone(),
            fps: self.fps,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }

    pub fn arena_meta(&self) -> ArenaMeta {
        ArenaMeta {
            arena_type: self.arena_type.clone(),
            arena_size_mm: self.arena_size_mm,
            pixels_per_mm: self.pixels_per_mm,
        }
    }

    pub fn software_meta(&self) -> SoftwareTrackingMeta {
        SoftwareTrackingMeta {
            tight_threshold: self.tight_threshold,
            loose_threshold: self.loose_threshold,
            date_tracked: self.date_tracked.clone(),
            tracking_software: self.tracking_software.clone(),
        }
    }

    /// Checks that every behavior has `expected_frames` flags, or, if `None`,
    /// that all behaviors agree in length.
    pub fn check_behaviors(&self, expected_frames: Option<usize>) -> Result<()> {
        let expected = match expected_frames.or_else(|| self.behaviors.values().next().map(Vec::len))
        {
            Some(expected) => expected,
            None => return Ok(()),
        };
        match self.behaviors.iter().find(|(_, flags)| flags.len() != expected) {
            Some((behavior, flags)) => Err(SummaryError::BehaviorLengthMismatch {
                behavior: behavior.clone(),
                expected,
                actual: flags.len(),
            }),
            None => Ok(()),
        }
    }

    /// JSON has no encoding for NaN or infinity, so persisting one would
    /// silently turn the field unset.
    fn check_finite(&self) -> Result<()> {
        let non_finite = Attribute::ALL.into_iter().find(|a| {
            matches!(self.get(*a), AttributeValue::Number(Some(n)) if !n.is_finite())
        });
        match non_finite {
            Some(attribute) => Err(SummaryError::InvalidValue {
                attribute: attribute.name(),
                expected: "a finite number",
            }),
            None => Ok(()),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.check_finite()?;
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let summary = serde_json::from_reader(reader)?;
        Ok(summary)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.check_finite()?;
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl std::fmt::Display for TrackingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
