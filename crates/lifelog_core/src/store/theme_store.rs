//! Persisted theme preference cell.

use crate::model::preferences::{ColorScheme, ThemeMode};
use crate::storage::{KeyValueStore, StorageResult};
use crate::store::persist::{read_snapshot, write_snapshot, Snapshot};
use log::warn;
use serde::{Deserialize, Serialize};

/// Storage key of the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme-storage";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeState {
    #[serde(default)]
    mode: ThemeMode,
}

/// Theme mode cell; defaults to `system`.
pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
    mode: ThemeMode,
    unsaved: bool,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Rehydrates the stored mode, falling back to the default on any failure.
    pub fn open(storage: S) -> Self {
        let mode = match read_snapshot(&storage, THEME_STORAGE_KEY) {
            Snapshot::Found { state, .. } => serde_json::from_value::<ThemeState>(state)
                .map(|state| state.mode)
                .unwrap_or_else(|err| {
                    warn!("event=state_load module=theme_store status=error error={err}");
                    ThemeMode::default()
                }),
            Snapshot::Missing | Snapshot::Unreadable(_) => ThemeMode::default(),
        };
        Self {
            storage,
            mode,
            unsaved: false,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Updates the mode; write failures are logged, not returned.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        if let Err(err) = self.flush() {
            warn!(
                "event=state_save module=theme_store status=error key={THEME_STORAGE_KEY} error={err}"
            );
        }
    }

    /// Concrete scheme given what the device currently reports.
    pub fn resolve(&self, device: Option<ColorScheme>) -> ColorScheme {
        self.mode.resolve(device)
    }

    /// Whether the current value failed to reach storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Writes the current value and reports the storage outcome.
    pub fn flush(&mut self) -> StorageResult<()> {
        let result = write_snapshot(
            &self.storage,
            THEME_STORAGE_KEY,
            &ThemeState { mode: self.mode },
        );
        self.unsaved = result.is_err();
        result
    }
}
