//! Last-good datasets on disk so the UI opens populated before (or without)
//! a network round trip. Corrupt or version-mismatched files are discarded.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::clubs_fetch::{ClubHonoursRow, ClubMeta};
use crate::compliance;
use crate::http_cache::app_cache_dir;
use crate::roster_fetch::Player;
use crate::state::AppState;
use crate::transfers_fetch::TransferItem;
use crate::updates_fetch::UpdateItem;

const CACHE_FILE: &str = "cache.json";
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    transfers: Vec<TransferItem>,
    #[serde(default)]
    clubs_meta: Vec<ClubMeta>,
    #[serde(default)]
    honours: Vec<ClubHonoursRow>,
    #[serde(default)]
    updates: Vec<UpdateItem>,
    #[serde(default)]
    players_fetched_at: Option<u64>,
    #[serde(default)]
    transfers_fetched_at: Option<u64>,
    #[serde(default)]
    clubs_meta_fetched_at: Option<u64>,
    #[serde(default)]
    honours_fetched_at: Option<u64>,
    #[serde(default)]
    updates_fetched_at: Option<u64>,
}

pub fn load_into_state(state: &mut AppState) {
    let Some(path) = cache_path() else {
        return;
    };
    let Ok(raw) = fs::read_to_string(&path) else {
        return;
    };
    let Ok(cache) = serde_json::from_str::<CacheFile>(&raw) else {
        return;
    };
    if cache.version != CACHE_VERSION {
        return;
    }

    state.players = cache.players;
    state.transfers = cache.transfers;
    state.clubs_meta = cache.clubs_meta;
    state.honours = cache.honours;
    state.updates = cache.updates;
    state.season_years = compliance::season_years(&state.players);
    state.players_fetched_at = cache.players_fetched_at.and_then(system_time_from_secs);
    state.transfers_fetched_at = cache.transfers_fetched_at.and_then(system_time_from_secs);
    state.clubs_meta_fetched_at = cache.clubs_meta_fetched_at.and_then(system_time_from_secs);
    state.honours_fetched_at = cache.honours_fetched_at.and_then(system_time_from_secs);
    state.updates_fetched_at = cache.updates_fetched_at.and_then(system_time_from_secs);
}

pub fn save_from_state(state: &AppState) {
    let Some(path) = cache_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    let _ = fs::create_dir_all(dir);

    let mut cache = load_cache_file(&path).unwrap_or_default();
    cache.version = CACHE_VERSION;
    cache.players = state.players.clone();
    cache.transfers = state.transfers.clone();
    cache.clubs_meta = state.clubs_meta.clone();
    cache.honours = state.honours.clone();
    cache.updates = state.updates.clone();
    cache.players_fetched_at = state.players_fetched_at.and_then(system_time_to_secs);
    cache.transfers_fetched_at = state.transfers_fetched_at.and_then(system_time_to_secs);
    cache.clubs_meta_fetched_at = state.clubs_meta_fetched_at.and_then(system_time_to_secs);
    cache.honours_fetched_at = state.honours_fetched_at.and_then(system_time_to_secs);
    cache.updates_fetched_at = state.updates_fetched_at.and_then(system_time_to_secs);

    if let Ok(json) = serde_json::to_string(&cache) {
        let tmp = path.with_extension("json.tmp");
        if fs::write(&tmp, json).is_ok() {
            let _ = fs::rename(&tmp, &path);
        }
    }
}

fn load_cache_file(path: &Path) -> Option<CacheFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<CacheFile>(&raw).ok()
}

fn cache_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn system_time_from_secs(secs: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(std::time::Duration::from_secs(secs))
}
