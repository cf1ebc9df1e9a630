//! Versioned persistence envelope shared by all stores.
//!
//! Every store writes `{"state": <state>, "version": N}` under its own key.
//! Payloads without an envelope are treated as version 0.

use crate::storage::{KeyValueStore, StorageResult};
use log::error;
use serde::Serialize;
use serde_json::Value;

/// Schema version written by this build.
pub const STATE_VERSION: u32 = 1;

/// Outcome of reading one persisted key.
#[derive(Debug)]
pub(crate) enum Snapshot {
    Missing,
    Found { version: u32, state: Value },
    Unreadable(String),
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    state: &'a T,
    version: u32,
}

/// Reads and unwraps the envelope under `key`.
///
/// Never fails: storage and decode errors come back as `Unreadable` and are
/// logged here once.
pub(crate) fn read_snapshot<S: KeyValueStore>(storage: &S, key: &str) -> Snapshot {
    let snapshot = match storage.get(key) {
        Ok(None) => return Snapshot::Missing,
        Ok(Some(raw)) => decode(&raw),
        Err(err) => Snapshot::Unreadable(format!("storage read failed: {err}")),
    };

    if let Snapshot::Unreadable(reason) = &snapshot {
        error!("event=state_load module=persist status=error key={key} reason={reason}");
    }
    snapshot
}

/// Serializes `state` inside a current-version envelope and stores it.
pub(crate) fn write_snapshot<S: KeyValueStore, T: Serialize>(
    storage: &S,
    key: &str,
    state: &T,
) -> StorageResult<()> {
    let payload = serde_json::to_string(&Envelope {
        state,
        version: STATE_VERSION,
    })?;
    storage.set(key, &payload)
}

fn decode(raw: &str) -> Snapshot {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(err) => return Snapshot::Unreadable(format!("invalid json: {err}")),
    };

    let Value::Object(mut object) = value else {
        return Snapshot::Found {
            version: 0,
            state: value,
        };
    };

    let Some(state) = object.remove("state") else {
        return Snapshot::Found {
            version: 0,
            state: Value::Object(object),
        };
    };

    let version = match object.get("version") {
        None | Some(Value::Null) => 0,
        Some(raw_version) => match raw_version.as_u64().and_then(|v| u32::try_from(v).ok()) {
            Some(version) => version,
            None => return Snapshot::Unreadable(format!("invalid version `{raw_version}`")),
        },
    };

    if version > STATE_VERSION {
        return Snapshot::Unreadable(format!(
            "state version {version} is newer than supported {STATE_VERSION}"
        ));
    }

    Snapshot::Found { version, state }
}
