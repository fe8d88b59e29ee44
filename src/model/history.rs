//! Pointer position history
//!
//! Two stores:
//! - [`HistoryRing`]: in-session jump list navigated with back/forward,
//!   with undo-tree semantics (a new jump discards the redo branch)
//! - [`PersistentHistory`]: click positions kept across sessions in a
//!   fixed-size binary file, rewritten in full on every change

use std::io;
use std::path::Path;

/// Capacity of the in-session ring
pub const RING_CAPACITY: usize = 16;

/// Capacity of the persistent click history
pub const PERSISTENT_CAPACITY: usize = 16;

/// Clicks closer than this to an existing entry replace it
pub const DEDUP_RADIUS: i32 = 30;

const MAGIC: &[u8; 4] = b"KWH1";

/// Size of the on-disk record: magic, count, then every slot
pub const RECORD_LEN: usize = 4 + 4 + PERSISTENT_CAPACITY * 8;

/// Fixed-capacity jump list.
///
/// `tail` and `head` are logical positions that only grow; a slot is
/// `position % RING_CAPACITY`. `cursor` always lies in `[tail, head)` when
/// the ring is non-empty.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    slots: [(i32, i32); RING_CAPACITY],
    head: usize,
    tail: usize,
    cursor: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRing {
    pub fn new() -> Self {
        Self {
            slots: [(0, 0); RING_CAPACITY],
            head: 0,
            tail: 0,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.head - self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    fn get(&self, position: usize) -> (i32, i32) {
        self.slots[position % RING_CAPACITY]
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<(i32, i32)> {
        (!self.is_empty()).then(|| self.get(self.cursor))
    }

    /// Record a position.
    ///
    /// Entries after the cursor are dropped first; repeating the newest entry
    /// is a no-op; a full ring evicts its oldest entry.
    pub fn insert(&mut self, x: i32, y: i32) {
        if !self.is_empty() {
            self.head = self.cursor + 1;
            if self.get(self.head - 1) == (x, y) {
                return;
            }
        }

        self.slots[self.head % RING_CAPACITY] = (x, y);
        self.head += 1;
        if self.len() > RING_CAPACITY {
            self.tail += 1;
        }
        self.cursor = self.head - 1;
    }

    /// Step back; stays put at the oldest entry
    pub fn prev(&mut self) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        if self.cursor > self.tail {
            self.cursor -= 1;
        }
        Some(self.get(self.cursor))
    }

    /// Step forward; stays put at the newest entry
    pub fn next(&mut self) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        if self.cursor + 1 < self.head {
            self.cursor += 1;
        }
        Some(self.get(self.cursor))
    }

    /// Entries oldest first
    pub fn entries(&self) -> Vec<(i32, i32)> {
        (self.tail..self.head).map(|p| self.get(p)).collect()
    }

    /// Cursor offset from the oldest entry
    pub fn cursor_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.cursor - self.tail)
    }
}

/// Click positions that survive restarts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentHistory {
    entries: Vec<(i32, i32)>,
}

impl PersistentHistory {
    /// Entries oldest first
    pub fn entries(&self) -> &[(i32, i32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a click position, replacing nearby entries and evicting the oldest
    /// when full
    pub fn insert(&mut self, x: i32, y: i32) {
        let r = i64::from(DEDUP_RADIUS);
        self.entries.retain(|&(ex, ey)| {
            let dx = (i64::from(ex) - i64::from(x)).abs();
            let dy = (i64::from(ey) - i64::from(y)).abs();
            dx > r || dy > r || dx * dx + dy * dy > r * r
        });
        if self.entries.len() >= PERSISTENT_CAPACITY {
            self.entries.remove(0);
        }
        self.entries.push((x, y));
    }

    /// Encode as the fixed-size on-disk record
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(RECORD_LEN);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for slot in 0..PERSISTENT_CAPACITY {
            let (x, y) = self.entries.get(slot).copied().unwrap_or((0, 0));
            buf.extend_from_slice(&x.to_le_bytes());
            buf.extend_from_slice(&y.to_le_bytes());
        }
        buf
    }

    /// Decode the on-disk record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != RECORD_LEN {
            return Err(format!(
                "expected {} bytes, found {}",
                RECORD_LEN,
                bytes.len()
            ));
        }
        if &bytes[0..4] != MAGIC {
            return Err("bad magic".to_string());
        }
        let count = read_u32(&bytes[4..8]) as usize;
        if count > PERSISTENT_CAPACITY {
            return Err(format!("entry count {} exceeds capacity", count));
        }
        let entries = (0..count)
            .map(|i| {
                let at = 8 + i * 8;
                (
                    read_u32(&bytes[at..at + 4]) as i32,
                    read_u32(&bytes[at + 4..at + 8]) as i32,
                )
            })
            .collect();
        Ok(Self { entries })
    }

    /// Load from disk; a missing or unreadable file yields an empty history
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt history file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read history file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Rewrite the whole record
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes())
    }

    /// Load, insert and save in one step
    pub fn record(path: &Path, x: i32, y: i32) -> io::Result<()> {
        let mut history = Self::load(path);
        history.insert(x, y);
        history.save(path)?;
        tracing::debug!("Recorded ({}, {}) in {}", x, y, path.display());
        Ok(())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    u32::from_le_bytes(word)
}
