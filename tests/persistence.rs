use courtship::video::FmfWriter;
use courtship::{Config, TimeZone, TrackingSummary};
use serde_json::json;

fn populated_summary(dir: &std::path::Path) -> TrackingSummary {
    let video = dir.join("courtship.fmf");
    let mut writer = FmfWriter::create(&video, 8, 8).unwrap();
    for frame in 0..6 {
        writer
            .write_frame(&[frame as u8; 64], 1_500_000_000.0 + frame as f64 / 24.0)
            .unwrap();
    }
    writer.finish().unwrap();

    let mut summary = TrackingSummary::new().with_time_zone(TimeZone::Utc);
    summary
        .set_attributes(
            json!({
                "video_file": video.to_string_lossy(),
                "arena_type": "circle",
                "arena_size_mm": 20.0,
                "pixels_per_mm": 11.7,
                "group": "CS",
                "tight_threshold": 40,
                "loose_threshold": 80,
                "date_tracked": "2017-07-20 09:30:00",
                "tracking_software": "courtship 0.1.0",
                "behaviors": {
                    "wing_ext": [0, 1, 1, 1, 0, 0],
                    "copulation": [false, false, false, false, false, true]
                }
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();
    summary
}

#[test]
fn populated_summary_survives_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let summary = populated_summary(dir.path());
    assert!((summary.fps.unwrap() - 24.0).abs() < 1e-3);
    assert_eq!(summary.start_time.as_deref(), Some("2017-07-14 02:40:00"));
    summary.check_behaviors(Some(6)).unwrap();

    let path = dir.path().join("summary.json");
    summary.save(&path).unwrap();
    let restored = TrackingSummary::load(&path).unwrap().with_time_zone(TimeZone::Utc);
    assert_eq!(restored, summary);
    assert_eq!(restored.behaviors["wing_ext"], vec![false, true, true, true, false, false]);
    assert_eq!(restored.describe(), summary.describe());
}

#[test]
fn persisted_form_omits_time_zone() {
    let dir = tempfile::tempdir().unwrap();
    let summary = populated_summary(dir.path());
    let value: serde_json::Value = serde_json::from_slice(&summary.to_bytes().unwrap()).unwrap();
    let object = value.as_object().unwrap();
    assert!(!object.contains_key("time_zone"));
    assert_eq!(object.len(), 13);
}

#[test]
fn partial_snapshot_loads_with_unset_fields() {
    let summary = TrackingSummary::from_bytes(br#"{"group": "CS"}"#).unwrap();
    assert_eq!(summary.group.as_deref(), Some("CS"));
    assert_eq!(summary.fps, None);
    assert!(summary.behaviors.is_empty());
}

#[test]
fn configured_zone_drives_derivation() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    Config {
        time_zone: TimeZone::FixedOffset { seconds_east: 3600 },
    }
    .save(&config_path)
    .unwrap();
    let config = Config::load(&config_path).unwrap();

    let mut summary = populated_summary(dir.path());
    summary.set_time_zone(config.time_zone);
    let stats = summary.apply_video_statistics().unwrap();
    assert_eq!(stats.start_time, "2017-07-14 03:40:00");
    assert_eq!(summary.start_time.as_deref(), Some("2017-07-14 03:40:00"));
}
