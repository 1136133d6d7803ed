//! Line buffer for console input

/// Maximum line length
pub const LINE_SIZE: usize = 64;

/// Fixed-size input line.
///
/// Bytes past `LINE_SIZE` are refused and the line is marked overflowed, so
/// a truncated command is never executed.
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
    overflowed: bool,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            overflowed: false,
        }
    }

    /// Append a byte. Returns `false` if the line is full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }

    /// Remove last character
    pub fn backspace(&mut self) {
        if self.len > 0 {
            self.len -= 1;
        }
    }

    /// Clear contents and the overflow mark
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Whether bytes were refused since the last clear.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
