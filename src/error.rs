use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SummaryError>;

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Not a valid attribute name: {}", .0.join(", "))]
    UnknownAttribute(Vec<String>),

    #[error("Invalid value for attribute {attribute}: expected {expected}")]
    InvalidValue {
        attribute: &'static str,
        expected: &'static str,
    },

    #[error("No video file set")]
    NoVideoFile,

    #[error("Video not found: {}", .0.display())]
    VideoNotFound(PathBuf),

    #[error("Frame rate is undefined for {0} timestamp(s), need at least 2")]
    InsufficientFrames(usize),

    #[error("Invalid timestamps: {0}")]
    InvalidTimestamps(String),

    #[error("Failed to decode video: {0}")]
    VideoDecode(String),

    #[error("Invalid UTC offset: {0} seconds")]
    InvalidTimeZone(i32),

    #[error("Behavior {behavior} has {actual} frames, expected {expected}")]
    BehaviorLengthMismatch {
        behavior: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
