//! Persisted user settings
//!
//! A single JSON file in the per-user config directory holds both profile
//! speeds and the notification preference. The file is rewritten in full on
//! every change; there is no history and no schema version. Every field has a
//! default so partial files (no notification flag) still load.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::constants::speed;
use crate::error::SettingsError;

/// Everything the app remembers between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Speed stored for profile 1 (0 = never set)
    #[serde(default, deserialize_with = "deserialize_speed")]
    pub profile1_speed: u32,

    /// Speed stored for profile 2 (0 = never set)
    #[serde(default, deserialize_with = "deserialize_speed")]
    pub profile2_speed: u32,

    /// Suppress the "still running" toast when hiding to the tray
    #[serde(default)]
    pub notifications_disabled: bool,
}

/// Custom deserializer accepting both integers and floats
///
/// Fractional values are truncated toward zero. Anything outside 1..=20
/// after truncation reads back as 0 (unset).
fn deserialize_speed<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrFloat {
        Int(i64),
        Float(f64),
    }

    let value = match IntOrFloat::deserialize(deserializer)? {
        IntOrFloat::Int(i) => i,
        IntOrFloat::Float(f) if f.is_finite() => f.trunc() as i64,
        IntOrFloat::Float(_) => 0,
    };
    let range = speed::MIN as i64..=speed::MAX as i64;
    Ok(if range.contains(&value) { value as u32 } else { 0 })
}

/// File-backed storage for [`SettingsRecord`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<config_dir>/MouseProfiles` (`%APPDATA%\MouseProfiles` on Windows)
    pub fn default_location() -> Self {
        let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(crate::constants::config::APP_DIR);
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(crate::constants::config::FILENAME)
    }

    /// Create the settings directory and an empty settings file if missing
    ///
    /// Never truncates an existing file.
    pub fn ensure_storage(&self) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.dir).map_err(|source| SettingsError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path();
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                info!(path = %path.display(), "Created empty settings file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(SettingsError::Io { path, source }),
        }
    }

    /// Read the settings file
    ///
    /// A missing or empty file is reported as `NotFound`.
    pub fn load(&self) -> Result<SettingsRecord, SettingsError> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SettingsError::NotFound(path)),
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        if contents.trim().is_empty() {
            return Err(SettingsError::NotFound(path));
        }

        let record = serde_json::from_str::<SettingsRecord>(&contents)
            .map_err(|source| SettingsError::Deserialization { path: path.clone(), source })?;
        info!(
            path = %path.display(),
            profile1 = record.profile1_speed,
            profile2 = record.profile2_speed,
            notifications_disabled = record.notifications_disabled,
            "Loaded settings"
        );
        Ok(record)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(&self) -> SettingsRecord {
        match self.load() {
            Ok(record) => record,
            Err(SettingsError::NotFound(path)) => {
                info!(path = %path.display(), "No saved settings, using defaults");
                SettingsRecord::default()
            }
            Err(e @ SettingsError::Deserialization { .. }) => {
                error!(error = %e, "Deserialization error, using default settings");
                SettingsRecord::default()
            }
            Err(e) => {
                error!(error = %e, "File IO error, using default settings");
                SettingsRecord::default()
            }
        }
    }

    /// Overwrite the settings file with `record`
    ///
    /// Creates the file (and its directory) when absent.
    pub fn save(&self, record: &SettingsRecord) -> Result<(), SettingsError> {
        let path = self.path();
        let io_err = |source: std::io::Error| SettingsError::Io {
            path: path.clone(),
            source,
        };

        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "Failed to create settings directory");
            return Err(io_err(e));
        }

        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)
            .map_err(|e| io_err(std::io::Error::from(e)))?;
        writer.flush().map_err(io_err)?;

        info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SettingsStore) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("MouseProfiles"));
        (dir, store)
    }

    #[test]
    fn test_ensure_storage_creates_dir_and_empty_file() {
        let (_dir, store) = temp_store();
        store.ensure_storage().unwrap();

        assert!(store.dir().is_dir());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn test_ensure_storage_is_idempotent_and_keeps_contents() {
        let (_dir, store) = temp_store();
        let record = SettingsRecord {
            profile1_speed: 4,
            profile2_speed: 16,
            notifications_disabled: true,
        };
        store.save(&record).unwrap();

        store.ensure_storage().unwrap();
        store.ensure_storage().unwrap();

        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.load(), Err(SettingsError::NotFound(_))));
    }

    #[test]
    fn test_load_empty_file_is_not_found() {
        let (_dir, store) = temp_store();
        store.ensure_storage().unwrap();
        assert!(matches!(store.load(), Err(SettingsError::NotFound(_))));
    }

    #[test]
    fn test_save_then_load_preserves_every_field() {
        let (_dir, store) = temp_store();
        for (p1, p2, disabled) in [(1, 20, false), (10, 10, true), (7, 3, true)] {
            let record = SettingsRecord {
                profile1_speed: p1,
                profile2_speed: p2,
                notifications_disabled: disabled,
            };
            store.save(&record).unwrap();
            assert_eq!(store.load().unwrap(), record);
        }
    }

    #[test]
    fn test_save_creates_missing_file_and_directory() {
        let (_dir, store) = temp_store();
        assert!(!store.dir().exists());

        store.save(&SettingsRecord::default()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn test_save_truncates_longer_previous_contents() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(), " ".repeat(4096)).unwrap();

        let record = SettingsRecord {
            profile1_speed: 2,
            profile2_speed: 9,
            notifications_disabled: false,
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn test_load_garbage_is_deserialization_error() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(), "<SliderData><Slider1Value>5").unwrap();

        assert!(matches!(
            store.load(),
            Err(SettingsError::Deserialization { .. })
        ));
        assert_eq!(store.load_or_default(), SettingsRecord::default());
    }

    #[test]
    fn test_fractional_speeds_truncate() {
        let json = r#"{ "profile1_speed": 6.0, "profile2_speed": 14.7 }"#;
        let record: SettingsRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.profile1_speed, 6);
        assert_eq!(record.profile2_speed, 14);
        assert!(!record.notifications_disabled);
    }

    #[test]
    fn test_partial_record_uses_defaults() {
        let record: SettingsRecord = serde_json::from_str(r#"{ "profile2_speed": 12 }"#).unwrap();
        assert_eq!(
            record,
            SettingsRecord {
                profile1_speed: 0,
                profile2_speed: 12,
                notifications_disabled: false,
            }
        );
    }

    #[test]
    fn test_negative_speed_reads_as_unset() {
        let record: SettingsRecord =
            serde_json::from_str(r#"{ "profile1_speed": -3, "profile2_speed": -1.5 }"#).unwrap();
        assert_eq!(record.profile1_speed, 0);
        assert_eq!(record.profile2_speed, 0);
    }

    #[test]
    fn test_out_of_range_speed_reads_as_unset() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.path(),
            r#"{ "profile1_speed": 99, "profile2_speed": 20.9, "notifications_disabled": true }"#,
        )
        .unwrap();

        let record = store.load().unwrap();
        assert_eq!(record.profile1_speed, 0);
        assert_eq!(record.profile2_speed, 20);
        assert!(record.notifications_disabled);

        let record: SettingsRecord =
            serde_json::from_str(r#"{ "profile1_speed": 21, "profile2_speed": 0.5 }"#).unwrap();
        assert_eq!((record.profile1_speed, record.profile2_speed), (0, 0));
    }

    #[test]
    fn test_load_or_default_on_fresh_install() {
        let (_dir, store) = temp_store();
        let record = store.load_or_default();

        assert_eq!(record.profile1_speed, 0);
        assert_eq!(record.profile2_speed, 0);
        assert!(!record.notifications_disabled);
    }
}
