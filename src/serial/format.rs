use core::fmt::{self, Write};

use heapless::String;

/// Maximum length of a message rendered by [`printf`](super::SerialChannel::printf).
pub const PRINTF_CAPACITY: usize = 256;

/// A fixed-capacity buffer that drops whatever doesn't fit.
pub struct Truncating<const N: usize> {
    buf: String<N>,
    truncated: bool,
}

impl<const N: usize> Truncating<N> {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for Truncating<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for Truncating<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if self.buf.push_str(s).is_ok() {
            return Ok(());
        }

        // Keep the longest prefix that fits on a char boundary
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                break;
            }
        }
        self.truncated = true;
        Ok(())
    }
}

/// Render `args` into a buffer of at most `N` bytes.
pub fn render<const N: usize>(args: fmt::Arguments<'_>) -> Truncating<N> {
    let mut out = Truncating::new();
    // Truncating::write_str never fails
    let _ = out.write_fmt(args);
    out
}
