//! Parent settings persistence
//!
//! Stored as `parent_settings.json` in the data directory. Every update is
//! pushed to subscribers through a watch channel.

use std::fs;
use std::path::PathBuf;

use tokio::sync::watch;

use super::models::ParentSettings;
use super::Result;

pub struct SettingsStorage {
    path: PathBuf,
    tx: watch::Sender<ParentSettings>,
}

impl SettingsStorage {
    /// Open the settings file in `base_path`, falling back to defaults when
    /// it does not exist yet.
    pub fn new(base_path: PathBuf) -> Result<Self> {
        let path = base_path.join("parent_settings.json");
        let current = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            ParentSettings::default()
        };
        let (tx, _rx) = watch::channel(current);
        Ok(Self { path, tx })
    }

    /// Current settings
    pub fn get(&self) -> ParentSettings {
        *self.tx.borrow()
    }

    /// Receiver that always holds the latest settings
    pub fn subscribe(&self) -> watch::Receiver<ParentSettings> {
        self.tx.subscribe()
    }

    /// Persist new day offsets and notify subscribers
    pub fn update(&self, settings: ParentSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&settings)?)?;
        self.tx.send_replace(settings);

        log::info!(
            "Updated parent settings: again={} hard={} easy={}",
            settings.again_days,
            settings.hard_days,
            settings.easy_days
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (SettingsStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_defaults_when_missing() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.get(), ParentSettings::default());
    }

    #[test]
    fn test_update_persists() {
        let (storage, temp) = create_test_storage();
        let settings = ParentSettings {
            again_days: 1,
            hard_days: 2,
            easy_days: 5,
        };
        storage.update(settings).unwrap();

        let reopened = SettingsStorage::new(temp.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get(), settings);
    }

    #[test]
    fn test_subscribers_see_updates() {
        let (storage, _temp) = create_test_storage();
        let mut rx = storage.subscribe();
        assert_eq!(*rx.borrow(), ParentSettings::default());

        let settings = ParentSettings {
            again_days: 0,
            hard_days: 3,
            easy_days: 8,
        };
        storage.update(settings).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), settings);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("parent_settings.json"), "{not json").unwrap();
        assert!(SettingsStorage::new(temp.path().to_path_buf()).is_err());
    }
}
