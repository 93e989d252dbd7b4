use serde::Serialize;
use tracing::warn;

use crate::error::DecodeError;
use crate::le::Le;

/// `"SHOT"` read as a little-endian u32.
pub const SHOT_MAGIC: u32 = 0x544F_4853;
pub const SHOT_HEADER_SIZE: usize = 128;
pub const SHOT_SAMPLE_SIZE: usize = 24;

const TEMP_SCALE: f64 = 10.0;
const PRESSURE_SCALE: f64 = 10.0;
const FLOW_SCALE: f64 = 100.0;
const WEIGHT_SCALE: f64 = 10.0;
const RESISTANCE_SCALE: f64 = 100.0;

// header layout
const OFF_VERSION: usize = 4;
const OFF_SAMPLE_SIZE: usize = 5;
const OFF_HEADER_SIZE: usize = 6;
const OFF_INTERVAL: usize = 8;
const OFF_FIELDS: usize = 12;
const OFF_COUNT: usize = 16;
const OFF_DURATION: usize = 20;
const OFF_START: usize = 24;
const OFF_PROFILE_ID: usize = 28;
const OFF_PROFILE_NAME: usize = 60;
const OFF_FINAL_WEIGHT: usize = 108;

/// One recorded tick of a shot, in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotSample {
    /// Milliseconds since the shot started.
    pub t_ms: u32,
    pub target_temperature: f64,
    pub current_temperature: f64,
    pub target_pressure: f64,
    pub current_pressure: f64,
    pub pump_flow: f64,
    pub target_flow: f64,
    pub puck_flow: f64,
    pub scale_flow: f64,
    pub weight: f64,
    pub estimated_weight: f64,
    pub puck_resistance: f64,
}

impl ShotSample {
    fn decode(rec: &Le<'_>, base: usize, interval_ms: u16) -> Self {
        let unsigned = |i: usize, scale: f64| rec.u16(base + i * 2) as f64 / scale;
        let signed = |i: usize, scale: f64| rec.i16(base + i * 2) as f64 / scale;
        ShotSample {
            t_ms: rec.u16(base) as u32 * interval_ms as u32,
            target_temperature: unsigned(1, TEMP_SCALE),
            current_temperature: unsigned(2, TEMP_SCALE),
            target_pressure: unsigned(3, PRESSURE_SCALE),
            current_pressure: unsigned(4, PRESSURE_SCALE),
            pump_flow: signed(5, FLOW_SCALE),
            target_flow: signed(6, FLOW_SCALE),
            puck_flow: signed(7, FLOW_SCALE),
            scale_flow: signed(8, FLOW_SCALE),
            weight: unsigned(9, WEIGHT_SCALE),
            estimated_weight: unsigned(10, WEIGHT_SCALE),
            puck_resistance: unsigned(11, RESISTANCE_SCALE),
        }
    }
}

/// A decoded `.slog` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotLog {
    pub version: u8,
    pub sample_interval_ms: u16,
    pub fields_mask: u32,
    /// Sample count promised by the header; 0 if never patched.
    pub samples_expected: u32,
    /// Shot start, seconds since the Unix epoch.
    pub start_epoch: u32,
    pub profile_id: String,
    pub profile_name: String,
    /// Header duration for a finished shot, else the last sample's time.
    pub duration_ms: u32,
    /// Final beverage weight in grams, if any was recorded.
    pub volume: Option<f64>,
    pub incomplete: bool,
    pub trailing_bytes: usize,
    pub samples: Vec<ShotSample>,
}

impl ShotLog {
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < SHOT_HEADER_SIZE {
            return Err(DecodeError::TooSmall {
                expected: SHOT_HEADER_SIZE,
                actual: buf.len(),
            });
        }
        let h = Le(buf);
        let magic = h.u32(0);
        if magic != SHOT_MAGIC {
            return Err(DecodeError::BadMagic {
                expected: SHOT_MAGIC,
                found: magic,
            });
        }
        let sample_size = h.u8(OFF_SAMPLE_SIZE) as usize;
        if sample_size != SHOT_SAMPLE_SIZE {
            return Err(DecodeError::RecordSize {
                expected: SHOT_SAMPLE_SIZE,
                found: sample_size,
            });
        }
        let header_size = h.u16(OFF_HEADER_SIZE) as usize;
        if header_size != SHOT_HEADER_SIZE {
            return Err(DecodeError::HeaderSize {
                expected: SHOT_HEADER_SIZE,
                found: header_size,
            });
        }

        let interval = h.u16(OFF_INTERVAL);
        let expected = h.u32(OFF_COUNT);
        let header_duration = h.u32(OFF_DURATION);
        let final_weight = h.u16(OFF_FINAL_WEIGHT);

        let body = buf.len() - SHOT_HEADER_SIZE;
        let whole = body / SHOT_SAMPLE_SIZE;
        let trailing_bytes = body % SHOT_SAMPLE_SIZE;
        let count = if expected == 0 {
            whole
        } else {
            whole.min(expected as usize)
        };
        let samples: Vec<ShotSample> = (0..count)
            .map(|i| ShotSample::decode(&h, SHOT_HEADER_SIZE + i * SHOT_SAMPLE_SIZE, interval))
            .collect();

        let incomplete = expected == 0 || trailing_bytes != 0 || expected as usize > whole;
        let last_t = samples.last().map(|s| s.t_ms).unwrap_or(0);
        let duration_ms = if !incomplete && header_duration != 0 {
            header_duration
        } else {
            last_t
        };
        let last_weight = samples.last().map(|s| s.weight).unwrap_or(0.0);
        let volume = if final_weight > 0 {
            Some(final_weight as f64 / WEIGHT_SCALE)
        } else if last_weight > 0.0 {
            Some(last_weight)
        } else {
            None
        };

        if incomplete {
            warn!(
                samples_expected = expected,
                samples_read = samples.len(),
                trailing_bytes,
                "shot log is incomplete"
            );
        }

        Ok(ShotLog {
            version: h.u8(OFF_VERSION),
            sample_interval_ms: interval,
            fields_mask: h.u32(OFF_FIELDS),
            samples_expected: expected,
            start_epoch: h.u32(OFF_START),
            profile_id: h.cstr(OFF_PROFILE_ID, 32),
            profile_name: h.cstr(OFF_PROFILE_NAME, 48),
            duration_ms,
            volume,
            incomplete,
            trailing_bytes,
            samples,
        })
    }
}
