//! In-process lock per game directory
//!
//! Marker read, purge, apply and marker write form one transaction per
//! directory. Two launches of the same game serialise here; different games
//! proceed independently.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, LazyLock, Mutex};

#[derive(Default)]
struct DirSlot {
    busy: Mutex<bool>,
    released: Condvar,
}

static DIR_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<DirSlot>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Held for the duration of one apply pass; released on drop
pub struct GameDirLock {
    key: PathBuf,
    slot: Arc<DirSlot>,
}

impl Drop for GameDirLock {
    fn drop(&mut self) {
        {
            let mut busy = self.slot.busy.lock().unwrap_or_else(|e| e.into_inner());
            *busy = false;
            self.slot.released.notify_one();
        }
        // Waiters clone the slot under the map lock, so the count is stable here
        let mut locks = DIR_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&self.slot) == 2 {
            locks.remove(&self.key);
        }
    }
}

fn slot_for(key: PathBuf) -> Arc<DirSlot> {
    let mut locks = DIR_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
    locks.entry(key).or_default().clone()
}

/// Block until this process holds the lock for `game_dir`. Symlinked and
/// relative spellings of the same directory share one lock.
pub fn lock_game_dir(game_dir: &Path) -> GameDirLock {
    let key = fs::canonicalize(game_dir).unwrap_or_else(|_| game_dir.to_path_buf());
    let slot = slot_for(key.clone());
    {
        let mut busy = slot.busy.lock().unwrap_or_else(|e| e.into_inner());
        while *busy {
            busy = slot.released.wait(busy).unwrap_or_else(|e| e.into_inner());
        }
        *busy = true;
    }
    GameDirLock { key, slot }
}
