//! Little-endian field access at fixed offsets.
//!
//! Callers check the buffer length against the record layout first, so
//! offsets here are always in range.

pub(crate) struct Le<'a>(pub &'a [u8]);

impl Le<'_> {
    pub fn u8(&self, off: usize) -> u8 {
        self.0[off]
    }

    pub fn u16(&self, off: usize) -> u16 {
        u16::from_le_bytes([self.0[off], self.0[off + 1]])
    }

    pub fn i16(&self, off: usize) -> i16 {
        i16::from_le_bytes([self.0[off], self.0[off + 1]])
    }

    pub fn u32(&self, off: usize) -> u32 {
        u32::from_le_bytes([
            self.0[off],
            self.0[off + 1],
            self.0[off + 2],
            self.0[off + 3],
        ])
    }

    /// NUL-terminated UTF-8 in a fixed-width field. Invalid bytes are
    /// replaced rather than rejected.
    pub fn cstr(&self, off: usize, width: usize) -> String {
        let field = &self.0[off..off + width];
        let len = field.iter().position(|&b| b == 0).unwrap_or(width);
        String::from_utf8_lossy(&field[..len]).into_owned()
    }
}
