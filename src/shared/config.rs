//! Application configuration. Data paths and timetable window.

use crate::domain::layout::{DEFAULT_END_HOUR, DEFAULT_HOUR_HEIGHT_PX, DEFAULT_START_HOUR};
use crate::domain::{Day, LayoutConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Snapshot file name inside `data_dir`.
pub const SCHEDULE_FILE: &str = "classes.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the schedule snapshot. Read from CLASSSYNC_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Timetable window
    // ─────────────────────────────────────────────────────────────────────────
    /// First visible hour (default 7). Read from CLASSSYNC_START_HOUR.
    #[serde(default)]
    pub start_hour: Option<u8>,

    /// Last visible hour row (default 17). Read from CLASSSYNC_END_HOUR.
    #[serde(default)]
    pub end_hour: Option<u8>,

    /// Pixel height of one hour row (default 80). Read from CLASSSYNC_HOUR_HEIGHT_PX.
    #[serde(default)]
    pub hour_height_px: Option<f64>,

    /// Column order, as day tags. Only settable from the CLASSSYNC_CONFIG file.
    #[serde(default)]
    pub ordered_days: Option<Vec<Day>>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CLASSSYNC_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("CLASSSYNC").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Returns the data directory. Defaults to `./data`.
    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir_or_default().join(SCHEDULE_FILE)
    }

    pub fn start_hour_or_default(&self) -> u8 {
        self.start_hour.unwrap_or(DEFAULT_START_HOUR)
    }

    pub fn end_hour_or_default(&self) -> u8 {
        self.end_hour.unwrap_or(DEFAULT_END_HOUR)
    }

    pub fn hour_height_px_or_default(&self) -> f64 {
        self.hour_height_px.unwrap_or(DEFAULT_HOUR_HEIGHT_PX)
    }

    /// Timetable configuration; checked when the layout is built.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            start_hour: self.start_hour_or_default(),
            end_hour: self.end_hour_or_default(),
            hour_height_px: self.hour_height_px_or_default(),
            ordered_days: self
                .ordered_days
                .clone()
                .unwrap_or_else(|| Day::ALL.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.schedule_path(), PathBuf::from("./data").join("classes.json"));
        assert_eq!(cfg.layout_config(), LayoutConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            data_dir: Some("/tmp/classsync".into()),
            start_hour: Some(8),
            end_hour: Some(20),
            hour_height_px: Some(60.0),
            ordered_days: Some(vec![Day::Sun, Day::Mon]),
        };
        let layout = cfg.layout_config();
        assert_eq!(layout.start_hour, 8);
        assert_eq!(layout.end_hour, 20);
        assert_eq!(layout.hour_height_px, 60.0);
        assert_eq!(layout.ordered_days, vec![Day::Sun, Day::Mon]);
        assert_eq!(cfg.schedule_path(), PathBuf::from("/tmp/classsync/classes.json"));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classsync.json");
        std::fs::write(
            &path,
            r#"{ "start_hour": 6, "ordered_days": ["Su", "M", "T", "W", "Th", "F", "Sa"] }"#,
        )
        .unwrap();
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.start_hour_or_default(), 6);
        assert_eq!(cfg.end_hour_or_default(), 17);
        assert_eq!(cfg.layout_config().ordered_days[0], Day::Sun);
    }
}
