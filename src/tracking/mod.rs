pub mod attributes;
pub mod meta;
pub mod summary;

pub use attributes::{parse_attributes, Attribute, AttributeValue, Behaviors};
pub use meta::{ArenaMeta, MetaValue, SoftwareTrackingMeta, VideoMeta};
pub use summary::TrackingSummary;
