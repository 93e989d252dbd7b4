use serde::Serialize;

use crate::error::DecodeError;
use crate::le::Le;

/// `"SIDX"` read as a little-endian u32.
pub const INDEX_MAGIC: u32 = 0x5844_4953;
pub const INDEX_HEADER_SIZE: usize = 32;
pub const INDEX_ENTRY_SIZE: usize = 128;

pub const SHOT_FLAG_COMPLETED: u8 = 0x01;
pub const SHOT_FLAG_DELETED: u8 = 0x02;
pub const SHOT_FLAG_HAS_NOTES: u8 = 0x04;

const WEIGHT_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub id: u32,
    /// Unix seconds.
    pub timestamp: u32,
    pub duration_ms: u32,
    /// Final weight in grams; absent when the index stored 0.
    pub volume: Option<f64>,
    /// 0-5 stars, 0 meaning unrated.
    pub rating: u8,
    pub flags: u8,
    pub profile_id: String,
    pub profile_name: String,
}

impl IndexEntry {
    pub fn completed(&self) -> bool {
        self.flags & SHOT_FLAG_COMPLETED != 0
    }

    pub fn deleted(&self) -> bool {
        self.flags & SHOT_FLAG_DELETED != 0
    }

    pub fn has_notes(&self) -> bool {
        self.flags & SHOT_FLAG_HAS_NOTES != 0
    }

    pub fn incomplete(&self) -> bool {
        !self.completed()
    }

    fn decode(buf: &Le<'_>, base: usize) -> Self {
        let volume = buf.u16(base + 12);
        IndexEntry {
            id: buf.u32(base),
            timestamp: buf.u32(base + 4),
            duration_ms: buf.u32(base + 8),
            volume: (volume > 0).then(|| volume as f64 / WEIGHT_SCALE),
            rating: buf.u8(base + 14),
            flags: buf.u8(base + 15),
            profile_id: buf.cstr(base + 16, 32),
            profile_name: buf.cstr(base + 48, 48),
        }
    }
}

/// A decoded `index.bin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotIndex {
    pub version: u16,
    pub next_id: u32,
    pub entries: Vec<IndexEntry>,
}

/// One row of the shot history, derived from a live index entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotListing {
    pub id: u32,
    pub profile: String,
    pub profile_id: String,
    pub timestamp: u32,
    pub duration_ms: u32,
    pub volume: Option<f64>,
    pub rating: Option<u8>,
    pub incomplete: bool,
    pub has_notes: bool,
}

impl ShotIndex {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < INDEX_HEADER_SIZE {
            return Err(DecodeError::TooSmall {
                expected: INDEX_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let h = Le(buf);
        let magic = h.u32(0);
        if magic != INDEX_MAGIC {
            return Err(DecodeError::BadMagic {
                expected: INDEX_MAGIC,
                found: magic,
            });
        }
        let entry_size = h.u16(6) as usize;
        if entry_size != INDEX_ENTRY_SIZE {
            return Err(DecodeError::RecordSize {
                expected: INDEX_ENTRY_SIZE,
                found: entry_size,
            });
        }
        let count = h.u32(8) as usize;
        let expected = count
            .checked_mul(INDEX_ENTRY_SIZE)
            .and_then(|n| n.checked_add(INDEX_HEADER_SIZE))
            .unwrap_or(usize::MAX);
        if buf.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: buf.len(),
            });
        }

        let entries = (0..count)
            .map(|i| IndexEntry::decode(&h, INDEX_HEADER_SIZE + i * INDEX_ENTRY_SIZE))
            .collect();
        Ok(ShotIndex {
            version: h.u16(4),
            next_id: h.u32(12),
            entries,
        })
    }

    /// Live shots, newest first. Deleted entries never appear.
    pub fn shot_list(&self) -> Vec<ShotListing> {
        let mut list: Vec<ShotListing> = self
            .entries
            .iter()
            .filter(|e| !e.deleted())
            .map(|e| ShotListing {
                id: e.id,
                profile: e.profile_name.clone(),
                profile_id: e.profile_id.clone(),
                timestamp: e.timestamp,
                duration_ms: e.duration_ms,
                volume: e.volume,
                rating: (e.rating > 0).then_some(e.rating),
                incomplete: e.incomplete(),
                has_notes: e.has_notes(),
            })
            .collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }
}
