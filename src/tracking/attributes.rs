use crate::error::{Result, SummaryError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type Behaviors = BTreeMap<String, Vec<bool>>;

/// Declared attributes of a [`TrackingSummary`](super::TrackingSummary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    VideoFile,
    Fps,
    StartTime,
    EndTime,
    ArenaType,
    ArenaSizeMm,
    PixelsPerMm,
    Group,
    TightThreshold,
    LooseThreshold,
    DateTracked,
    TrackingSoftware,
    Behaviors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Text,
    Number,
    Behaviors,
}

impl Attribute {
    pub const ALL: [Attribute; 13] = [
        Attribute::VideoFile,
        Attribute::Fps,
        Attribute::StartTime,
        Attribute::EndTime,
        Attribute::ArenaType,
        Attribute::ArenaSizeMm,
        Attribute::PixelsPerMm,
        Attribute::Group,
        Attribute::TightThreshold,
        Attribute::LooseThreshold,
        Attribute::DateTracked,
        Attribute::TrackingSoftware,
        Attribute::Behaviors,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::VideoFile => "video_file",
            Attribute::Fps => "fps",
            Attribute::StartTime => "start_time",
            Attribute::EndTime => "end_time",
            Attribute::ArenaType => "arena_type",
            Attribute::ArenaSizeMm => "arena_size_mm",
            Attribute::PixelsPerMm => "pixels_per_mm",
            Attribute::Group => "group",
            Attribute::TightThreshold => "tight_threshold",
            Attribute::LooseThreshold => "loose_threshold",
            Attribute::DateTracked => "date_tracked",
            Attribute::TrackingSoftware => "tracking_software",
            Attribute::Behaviors => "behaviors",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Everything but the per-frame behavior flags describes the session.
    pub fn is_metadata(self) -> bool {
        self != Attribute::Behaviors
    }

    pub(crate) fn kind(self) -> Kind {
        match self {
            Attribute::Fps
            | Attribute::ArenaSizeMm
            | Attribute::PixelsPerMm
            | Attribute::TightThreshold
            | Attribute::LooseThreshold => Kind::Number,
            Attribute::Behaviors => Kind::Behaviors,
            _ => Kind::Text,
        }
    }

    fn expected(self) -> &'static str {
        match self.kind() {
            Kind::Text => "a string or null",
            Kind::Number => "a number or null",
            Kind::Behaviors => "an object mapping behavior names to arrays of 0/1 flags",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed value of one attribute. `None` marks an unset field.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(Option<String>),
    Number(Option<f64>),
    Behaviors(Behaviors),
}

impl AttributeValue {
    pub fn from_json(attribute: Attribute, value: &Value) -> Result<Self> {
        let invalid = || SummaryError::InvalidValue {
            attribute: attribute.name(),
            expected: attribute.expected(),
        };
        match (attribute.kind(), value) {
            (Kind::Text, Value::Null) => Ok(AttributeValue::Text(None)),
            (Kind::Text, Value::String(s)) => Ok(AttributeValue::Text(Some(s.clone()))),
            (Kind::Number, Value::Null) => Ok(AttributeValue::Number(None)),
            (Kind::Number, Value::Number(n)) => {
                Ok(AttributeValue::Number(Some(n.as_f64().ok_or_else(invalid)?)))
            }
            (Kind::Behaviors, Value::Null) => Ok(AttributeValue::Behaviors(Behaviors::new())),
            (Kind::Behaviors, Value::Object(map)) => map
                .iter()
                .map(|(name, flags)| -> Result<(String, Vec<bool>)> {
                    Ok((name.clone(), parse_flags(flags).ok_or_else(invalid)?))
                })
                .collect::<Result<Behaviors>>()
                .map(AttributeValue::Behaviors),
            _ => Err(invalid()),
        }
    }
}

fn parse_flags(value: &Value) -> Option<Vec<bool>> {
    value
        .as_array()?
        .iter()
        .map(|flag| match flag {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_f64() {
                Some(x) if x == 0.0 => Some(false),
                Some(x) if x == 1.0 => Some(true),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Resolves and converts every entry of `values` without touching any record.
/// All unknown keys are reported together.
pub fn parse_attributes(values: &Map<String, Value>) -> Result<Vec<(Attribute, AttributeValue)>> {
    let unknown: Vec<String> = values
        .keys()
        .filter(|key| Attribute::from_name(key).is_none())
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(SummaryError::UnknownAttribute(unknown));
    }
    values
        .iter()
        .filter_map(|(key, value)| Attribute::from_name(key).map(|a| (a, value)))
        .map(|(attribute, value)| -> Result<(Attribute, AttributeValue)> {
            Ok((attribute, AttributeValue::from_json(attribute, value)?))
        })
        .collect()
}
