pub mod fmf;
pub mod statistics;

pub use fmf::{FmfReader, FmfWriter};
pub use statistics::VideoStatistics;

use crate::error::{Result, SummaryError};
use std::path::Path;

/// Anything that can produce the ordered per-frame capture timestamps of a
/// video, in seconds since the unix epoch.
pub trait TimestampSource {
    fn timestamps(&mut self) -> Result<Vec<f64>>;
}

impl TimestampSource for Vec<f64> {
    fn timestamps(&mut self) -> Result<Vec<f64>> {
        Ok(self.clone())
    }
}

/// Opens the video at `path` with the backend matching its extension.
pub fn open(path: &Path) -> Result<Box<dyn TimestampSource>> {
    if !path.is_file() {
        return Err(SummaryError::VideoNotFound(path.to_path_buf()));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("fmf") => Ok(Box::new(FmfReader::open(path)?)),
        _ => Err(SummaryError::VideoDecode(format!(
            "unsupported video container: {}",
            path.display()
        ))),
    }
}
