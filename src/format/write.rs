//! Byte sink used by the formatter, with a size-limiting wrapper.

use core::fmt;
use std::collections::TryReserveError;

use crate::FormatError;

/// Bridges [`core::fmt::Write`] onto a [`Write`] sink, keeping the first
/// sink error rather than collapsing it into [`core::fmt::Error`].
struct Adapter<'a, T: ?Sized> {
    sink: &'a mut T,
    error: Result<(), FormatError>,
}

impl<T: Write + ?Sized> fmt::Write for Adapter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.write_all(s.as_bytes()).map_err(|error| {
            self.error = Err(error);
            fmt::Error
        })
    }
}

/// Byte-oriented version of the [`std::io::Write`] trait.
///
/// [`std::io::Write`]: <https://doc.rust-lang.org/std/io/trait.Write.html>
pub(crate) trait Write {
    /// Attempts to write an entire buffer into this writer.
    fn write_all(&mut self, data: &[u8]) -> Result<(), FormatError>;

    /// Writes a formatted string into this writer, returning any error
    /// encountered.
    fn write_fmt(&mut self, fmt_args: fmt::Arguments<'_>) -> Result<(), FormatError> {
        let mut adapter = Adapter {
            sink: self,
            error: Ok(()),
        };

        match fmt::write(&mut adapter, fmt_args) {
            Ok(()) => Ok(()),
            Err(_) if adapter.error.is_err() => adapter.error,
            Err(_) => Err(FormatError::FmtError),
        }
    }
}

/// A mutable byte slice is filled front to back; output that does not fit
/// reports a short write after filling what does.
impl Write for &mut [u8] {
    fn write_all(&mut self, data: &[u8]) -> Result<(), FormatError> {
        let available = self.len().min(data.len());
        let (filled, rest) = core::mem::take(self).split_at_mut(available);
        filled.copy_from_slice(&data[..available]);
        *self = rest;

        if available < data.len() {
            return Err(FormatError::WriteZero);
        }
        Ok(())
    }
}

/// A vector grows as needed; only allocation failure can error.
impl Write for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), FormatError> {
        self.try_reserve(data.len())?;
        self.extend_from_slice(data);
        Ok(())
    }
}

impl From<TryReserveError> for FormatError {
    fn from(_: TryReserveError) -> Self {
        FormatError::FormattedStringTooLarge
    }
}

/// Caps the total number of bytes a sink will accept, so a pathological
/// width cannot balloon the output.
pub(crate) struct SizeLimiter<'a> {
    sink: &'a mut dyn Write,
    limit: usize,
    written: usize,
}

impl<'a> SizeLimiter<'a> {
    pub(crate) fn new(sink: &'a mut dyn Write, limit: usize) -> Self {
        Self {
            sink,
            limit,
            written: 0,
        }
    }
}

impl Write for SizeLimiter<'_> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), FormatError> {
        if self.written + data.len() > self.limit {
            return Err(FormatError::FormattedStringTooLarge);
        }

        self.sink.write_all(data)?;
        self.written += data.len();
        Ok(())
    }
}
