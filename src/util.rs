pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("{}: {:.2?}", self.name, self.start.elapsed());
    }
}

/// `None` if the duration is negative or too long to represent.
pub fn framenumber_to_hhmmss(framenumber: u64, fps: f64) -> Option<String> {
    let duration = std::time::Duration::try_from_secs_f64(framenumber as f64 / fps).ok()?;
    let seconds = duration.as_secs() % 60;
    let minutes = (duration.as_secs() / 60) % 60;
    let hours = (duration.as_secs() / 60) / 60;
    Some(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_frame_durations() {
        assert_eq!(framenumber_to_hhmmss(0, 24.0).as_deref(), Some("00:00:00"));
        assert_eq!(framenumber_to_hhmmss(24 * 61, 24.0).as_deref(), Some("00:01:01"));
        assert_eq!(framenumber_to_hhmmss(30 * 3725, 30.0).as_deref(), Some("01:02:05"));
    }

    #[test]
    fn unrepresentable_durations_are_none() {
        assert_eq!(framenumber_to_hhmmss(10, 1e-300), None);
        assert_eq!(framenumber_to_hhmmss(10, f64::NAN), None);
        assert_eq!(framenumber_to_hhmmss(10, -24.0), None);
    }
}
