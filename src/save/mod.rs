//! Save / load — JSON snapshots of the clock, the field, and the economy.
//!
//! Native builds write `slot_N.json` files atomically (temp file + rename).
//! Browser builds keep the same JSON in `localStorage`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::calendar::DayClock;
use crate::economy::wallet::Economy;
use crate::farming::Field;
use crate::input::PlayerInput;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save slot {0} does not exist")]
    Missing(u8),
    #[error("{action} failed for {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save data is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("browser storage: {0}")]
    Storage(String),
}

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub slot: u8,
    pub save_timestamp: u64,
    pub clock: DayClock,
    pub field: Field,
    pub economy: Economy,
}

impl SaveFile {
    pub fn snapshot(slot: u8, clock: &DayClock, field: &Field, economy: &Economy) -> Self {
        Self {
            version: SAVE_VERSION,
            slot,
            save_timestamp: current_timestamp(),
            clock: clock.clone(),
            field: field.clone(),
            economy: economy.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent {
    pub slot: u8,
}

#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent {
    pub slot: u8,
}

/// Sent by SavePlugin after a save completes (success or failure).
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub slot: u8,
    pub success: bool,
    pub message: String,
}

#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub slot: u8,
    pub success: bool,
    pub message: String,
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveSaveSlot {
    pub slot: u8,
}

/// Where slots live: a directory on native, a key prefix in the browser.
#[derive(Resource, Debug, Clone)]
pub struct SaveLocation {
    pub dir: PathBuf,
}

impl Default for SaveLocation {
    fn default() -> Self {
        Self { dir: saves_directory() }
    }
}

impl SaveLocation {
    pub fn slot_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("slot_{}.json", slot))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveSaveSlot>()
            .init_resource::<SaveLocation>()
            .add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            .add_systems(
                Update,
                autosave_on_day_passed
                    .in_set(FarmSet::Settle)
                    .run_if(in_state(GameState::Playing)),
            )
            // Save after the frame's economy has settled; load last so the
            // restored state is what gets rendered.
            .add_systems(
                Update,
                (quicksave_keybind, handle_save_request, handle_load_request)
                    .chain()
                    .in_set(FarmSet::Present)
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE BACKENDS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(target_arch = "wasm32")]
fn saves_directory() -> PathBuf {
    PathBuf::from("sproutvale/saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn current_timestamp() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
fn store(location: &SaveLocation, slot: u8, json: &str) -> Result<(), SaveError> {
    fs::create_dir_all(&location.dir).map_err(io_error("create directory", &location.dir))?;
    let path = location.slot_path(slot);
    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(io_error("write", &tmp_path))?;
    fs::rename(&tmp_path, &path).map_err(io_error("rename", &path))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn io_error(action: &'static str, path: &std::path::Path) -> impl FnOnce(std::io::Error) -> SaveError {
    let path = path.to_path_buf();
    move |source| SaveError::Io { action, path, source }
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch(location: &SaveLocation, slot: u8) -> Result<String, SaveError> {
    let path = location.slot_path(slot);
    match fs::read_to_string(&path) {
        Ok(json) => Ok(json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SaveError::Missing(slot)),
        Err(source) => Err(SaveError::Io { action: "read", path, source }),
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, SaveError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| SaveError::Storage("localStorage is unavailable".to_string()))
}

#[cfg(target_arch = "wasm32")]
fn store(location: &SaveLocation, slot: u8, json: &str) -> Result<(), SaveError> {
    let key = location.slot_path(slot).display().to_string();
    local_storage()?
        .set_item(&key, json)
        .map_err(|_| SaveError::Storage(format!("could not write {}", key)))
}

#[cfg(target_arch = "wasm32")]
fn fetch(location: &SaveLocation, slot: u8) -> Result<String, SaveError> {
    let key = location.slot_path(slot).display().to_string();
    local_storage()?
        .get_item(&key)
        .map_err(|_| SaveError::Storage(format!("could not read {}", key)))?
        .ok_or(SaveError::Missing(slot))
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD LOGIC
// ═══════════════════════════════════════════════════════════════════════

pub fn write_save(location: &SaveLocation, file: &SaveFile) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(file)?;
    store(location, file.slot, &json)
}

pub fn read_save(location: &SaveLocation, slot: u8) -> Result<SaveFile, SaveError> {
    let json = fetch(location, slot)?;
    let file: SaveFile = serde_json::from_str(&json)?;

    // Version check — future versions can add migration here
    if file.version != SAVE_VERSION {
        warn!(
            "[Save] Slot {} has version {} but current version is {}. Attempting to load anyway.",
            slot, file.version, SAVE_VERSION
        );
    }
    Ok(file)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    mut active_slot: ResMut<ActiveSaveSlot>,
    location: Res<SaveLocation>,
    clock: Res<DayClock>,
    field: Res<Field>,
    economy: Res<Economy>,
) {
    for ev in save_events.read() {
        let slot = ev.slot;
        active_slot.slot = slot;

        let file = SaveFile::snapshot(slot, &clock, &field, &economy);
        match write_save(&location, &file) {
            Ok(()) => {
                info!("[Save] Saved day {} to slot {}", clock.day, slot);
                complete_events.send(SaveCompleteEvent {
                    slot,
                    success: true,
                    message: String::new(),
                });
            }
            Err(e) => {
                warn!("[Save] Save to slot {} FAILED: {}", slot, e);
                complete_events.send(SaveCompleteEvent {
                    slot,
                    success: false,
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    mut changed_writer: EventWriter<EconomyChangedEvent>,
    mut active_slot: ResMut<ActiveSaveSlot>,
    location: Res<SaveLocation>,
    state: Res<State<GameState>>,
    mut clock: ResMut<DayClock>,
    mut field: ResMut<Field>,
    mut economy: ResMut<Economy>,
) {
    for ev in load_events.read() {
        let slot = ev.slot;
        match read_save(&location, slot) {
            Ok(file) => {
                active_slot.slot = slot;
                *clock = file.clock;
                // The clock runs only while Playing, whatever state it was saved in.
                clock.paused = *state.get() != GameState::Playing;
                *field = file.field;
                *economy = file.economy;
                for kind in ResourceKind::ALL {
                    changed_writer.send(EconomyChangedEvent {
                        kind,
                        balance: economy.balance(kind),
                    });
                }

                info!("[Save] Loaded day {} from slot {}", clock.day, slot);
                complete_events.send(LoadCompleteEvent {
                    slot,
                    success: true,
                    message: String::new(),
                });
            }
            Err(e) => {
                warn!("[Save] Load from slot {} FAILED: {}", slot, e);
                complete_events.send(LoadCompleteEvent {
                    slot,
                    success: false,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Autosave to the active slot at the start of each new day.
pub fn autosave_on_day_passed(
    mut day_events: EventReader<DayPassedEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    active_slot: Res<ActiveSaveSlot>,
) {
    if let Some(ev) = day_events.read().last() {
        info!("[Save] Autosaving on day {}", ev.day);
        save_writer.send(SaveRequestEvent {
            slot: active_slot.slot,
        });
    }
}

/// F5 = quicksave to active slot, F9 = quickload from active slot.
fn quicksave_keybind(
    player_input: Option<Res<PlayerInput>>,
    active_slot: Res<ActiveSaveSlot>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut load_writer: EventWriter<LoadRequestEvent>,
) {
    let Some(player_input) = player_input else {
        return;
    };
    if player_input.quicksave {
        save_writer.send(SaveRequestEvent {
            slot: active_slot.slot,
        });
    }
    if player_input.quickload {
        load_writer.send(LoadRequestEvent {
            slot: active_slot.slot,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file(slot: u8) -> SaveFile {
        let mut clock = DayClock::new(30.0);
        clock.day = 4;
        clock.progress = 0.5;
        let mut field = Field::new(2, 2);
        field.get_mut(1, 0).unwrap().apply(FarmAction::Till, 0, &CropDef::default()).unwrap();
        let mut economy = Economy::with_balances([(ResourceKind::Funds, 42), (ResourceKind::Seeds, 2)]);
        economy.raise_flag(ProgressFlag::FirstHarvest);
        SaveFile::snapshot(slot, &clock, &field, &economy)
    }

    #[test]
    fn test_write_then_read_restores_state() {
        let dir = tempfile::tempdir().unwrap();
        let location = SaveLocation { dir: dir.path().join("saves") };
        let file = sample_file(1);

        write_save(&location, &file).unwrap();
        let loaded = read_save(&location, 1).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.field.get(1, 0).unwrap().condition, TileCondition::Tilled);

        // The temp file is renamed away, not left behind.
        assert!(!location.slot_path(1).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_slot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let location = SaveLocation { dir: dir.path().to_path_buf() };
        assert!(matches!(read_save(&location, 2), Err(SaveError::Missing(2))));
    }

    #[test]
    fn test_corrupt_save_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let location = SaveLocation { dir: dir.path().to_path_buf() };
        std::fs::write(location.slot_path(0), "{ not json").unwrap();
        assert!(matches!(read_save(&location, 0), Err(SaveError::Format(_))));
    }

    #[test]
    fn test_future_version_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let location = SaveLocation { dir: dir.path().to_path_buf() };
        let mut file = sample_file(0);
        file.version = SAVE_VERSION + 1;
        write_save(&location, &file).unwrap();
        assert_eq!(read_save(&location, 0).unwrap().clock.day, 4);
    }
}
