//! Size-limited file loading.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Largest profile source accepted (1 MB).
pub const MAX_TEXT_SIZE: usize = 1_000_000;
/// Largest shot log or index accepted (16 MB).
pub const MAX_BINARY_SIZE: usize = 16 * 1024 * 1024;
/// Longest series `simulate` will produce, about 27 hours at 0.1 s.
pub const MAX_SAMPLES: u64 = 1_000_000;

pub fn read_text(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if src.len() > MAX_TEXT_SIZE {
        bail!(
            "'{}' exceeds the {}MB limit ({} bytes)",
            path.display(),
            MAX_TEXT_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

pub fn read_binary(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    if bytes.len() > MAX_BINARY_SIZE {
        bail!(
            "'{}' exceeds the {}MB limit ({} bytes)",
            path.display(),
            MAX_BINARY_SIZE / (1024 * 1024),
            bytes.len()
        );
    }
    Ok(bytes)
}
