use super::attributes::AttributeValue;
use serde::{Deserialize, Serialize};

/// One entry of a metadata snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MetaValue {
    Unset,
    Text(String),
    Number(f64),
}

impl MetaValue {
    pub fn is_set(&self) -> bool {
        !matches!(self, MetaValue::Unset)
    }
}

impl From<AttributeValue> for MetaValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Text(Some(s)) => MetaValue::Text(s),
            AttributeValue::Number(Some(n)) => MetaValue::Number(n),
            _ => MetaValue::Unset,
        }
    }
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaValue::Unset => f.write_str("None"),
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Recording parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VideoMeta {
    pub video_file: Option<String>,
    pub fps: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Physical setup of the recording.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ArenaMeta {
    pub arena_type: Option<String>,
    /// Diameter if circular.
    pub arena_size_mm: Option<f64>,
    pub pixels_per_mm: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SoftwareTrackingMeta {
    pub tight_threshold: Option<f64>,
    pub loose_threshold: Option<f64>,
    pub date_tracked: Option<String>,
    pub tracking_software: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_renders_as_none() {
        assert_eq!(MetaValue::Unset.to_string(), "None");
        assert_eq!(MetaValue::Number(29.97).to_string(), "29.97");
        assert_eq!(MetaValue::Text("circle".to_owned()).to_string(), "circle");
    }

    #[test]
    fn converts_from_attribute_values() {
        assert_eq!(MetaValue::from(AttributeValue::Text(None)), MetaValue::Unset);
        assert_eq!(
            MetaValue::from(AttributeValue::Number(Some(1.5))),
            MetaValue::Number(1.5)
        );
        assert!(!MetaValue::from(AttributeValue::Number(None)).is_set());
    }

    #[test]
    fn serializes_unset_as_null() {
        let json = serde_json::to_string(&vec![
            MetaValue::Unset,
            MetaValue::Number(2.0),
            MetaValue::Text("a".to_owned()),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,2.0,"a"]"#);
    }
}
