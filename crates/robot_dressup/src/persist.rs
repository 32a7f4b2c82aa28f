//! The one piece of state that survives restarts: whether the player has
//! been through the onboarding tutorial.

use serde::{Deserialize, Serialize};

/// Storage key (wasm) / file stem (native) for the flag.
pub const TUTORIAL_COMPLETED_KEY: &str = "tutorial_completed";

#[cfg(not(target_arch = "wasm32"))]
const SAVE_FILE: &str = "robot_dressup_save.json";

/// The save lives next to the executable, not in the working directory, so
/// launching from another location still finds it.
#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> std::path::PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_default()
        .join(SAVE_FILE)
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("browser storage unavailable")]
    Storage,
}

#[derive(Serialize, Deserialize, Default)]
struct SaveData {
    tutorial_completed: bool,
}

/// True when a completed tutorial has been recorded. Any load problem reads
/// as "not completed" so the worst failure mode is replaying the tutorial.
pub fn tutorial_completed() -> bool {
    load().map(|data| data.tutorial_completed).unwrap_or(false)
}

pub fn record_tutorial_completed() -> Result<(), PersistError> {
    store(&SaveData {
        tutorial_completed: true,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn load() -> Result<SaveData, PersistError> {
    let raw = std::fs::read_to_string(save_path())?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn store(data: &SaveData) -> Result<(), PersistError> {
    let raw = serde_json::to_string(data)?;
    std::fs::write(save_path(), raw)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(PersistError::Storage)
}

#[cfg(target_arch = "wasm32")]
fn load() -> Result<SaveData, PersistError> {
    let raw = local_storage()?
        .get_item(TUTORIAL_COMPLETED_KEY)
        .map_err(|_| PersistError::Storage)?
        .ok_or(PersistError::Storage)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(target_arch = "wasm32")]
fn store(data: &SaveData) -> Result<(), PersistError> {
    let raw = serde_json::to_string(data)?;
    local_storage()?
        .set_item(TUTORIAL_COMPLETED_KEY, &raw)
        .map_err(|_| PersistError::Storage)
}
