//! Persisted language preference cell.

use crate::model::preferences::{EffectiveLanguage, Language};
use crate::storage::{KeyValueStore, StorageResult};
use crate::store::persist::{read_snapshot, write_snapshot, Snapshot};
use log::warn;
use serde::{Deserialize, Serialize};

/// Storage key of the language preference.
pub const LANGUAGE_STORAGE_KEY: &str = "language-storage";

#[derive(Debug, Default, Serialize, Deserialize)]
struct LanguageState {
    #[serde(default)]
    language: Language,
}

/// Language cell; defaults to `system`.
pub struct LanguageStore<S: KeyValueStore> {
    storage: S,
    language: Language,
    unsaved: bool,
}

impl<S: KeyValueStore> LanguageStore<S> {
    pub fn open(storage: S) -> Self {
        let language = match read_snapshot(&storage, LANGUAGE_STORAGE_KEY) {
            Snapshot::Found { state, .. } => serde_json::from_value::<LanguageState>(state)
                .map(|state| state.language)
                .unwrap_or_else(|err| {
                    warn!("event=state_load module=language_store status=error error={err}");
                    Language::default()
                }),
            Snapshot::Missing | Snapshot::Unreadable(_) => Language::default(),
        };
        Self {
            storage,
            language,
            unsaved: false,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(err) = self.flush() {
            warn!(
                "event=state_save module=language_store status=error key={LANGUAGE_STORAGE_KEY} error={err}"
            );
        }
    }

    /// Resolves `system` against the device locale (e.g. `ja-JP`).
    pub fn effective_language(&self, device_locale: Option<&str>) -> EffectiveLanguage {
        self.language.effective(device_locale)
    }

    /// Whether the current value failed to reach storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Writes the current value and reports the storage outcome.
    pub fn flush(&mut self) -> StorageResult<()> {
        let result = write_snapshot(
            &self.storage,
            LANGUAGE_STORAGE_KEY,
            &LanguageState {
                language: self.language,
            },
        );
        self.unsaved = result.is_err();
        result
    }
}
