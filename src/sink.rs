//! Output fan-out and scoped console silencing.
//!
//! - [`MultiSink`]: forwards every write, in fixed order, to all
//!   configured destinations (here: console and the append-mode log
//!   file), so both update in real time with identical bytes.
//! - [`ConsoleSink`] + [`SilenceGuard`]: the console destination can be
//!   muted for the scope of a probe call, since the underlying probing
//!   capability is noisy by default. Restoration is tied to guard drop
//!   so it happens on every exit path, errors and panics included.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fan-out writer over N destinations.
///
/// Best-effort, not transactional: a failing destination propagates its
/// error immediately, and whatever earlier destinations already
/// accepted in that call stays written.
pub struct MultiSink {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl MultiSink {
    /// Wrap the given destinations. Order is preserved for every write.
    pub fn new(sinks: Vec<Box<dyn Write + Send>>) -> Self {
        Self { sinks }
    }
}

impl Write for MultiSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

/// Console destination whose output can be discarded for a scope.
///
/// Cloning yields a handle to the same silencing state, so the copy
/// placed inside a [`MultiSink`] observes guards taken from the
/// original handle.
#[derive(Clone)]
pub struct ConsoleSink {
    silenced: Arc<AtomicBool>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            silenced: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Discard console output until the returned guard is dropped.
    #[must_use = "silencing ends when the guard is dropped"]
    pub fn silence(&self) -> SilenceGuard {
        self.silenced.store(true, Ordering::SeqCst);
        SilenceGuard {
            silenced: Arc::clone(&self.silenced),
        }
    }

    fn is_silenced(&self) -> bool {
        self.silenced.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.is_silenced() {
            // Pretend the write happened; the bytes go nowhere.
            return Ok(buf.len());
        }
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.is_silenced() {
            return Ok(());
        }
        io::stdout().flush()
    }
}

/// Restores console output when dropped.
pub struct SilenceGuard {
    silenced: Arc<AtomicBool>,
}

impl Drop for SilenceGuard {
    fn drop(&mut self) {
        self.silenced.store(false, Ordering::SeqCst);
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::SharedBuf;
    use super::*;

    #[test]
    fn test_fan_out_is_byte_identical() {
        let a = SharedBuf::default();
        let b = SharedBuf::default();
        let mut sink = MultiSink::new(vec![Box::new(a.clone()), Box::new(b.clone())]);

        sink.write_all(b"#header\n").unwrap();
        sink.write_all(b"row,1\n").unwrap();
        sink.flush().unwrap();

        let left = a.contents();
        let right = b.contents();
        assert_eq!(left, right);
        assert_eq!(left, b"#header\nrow,1\n");
    }

    #[test]
    fn test_silence_guard_restores_on_drop() {
        let console = ConsoleSink::new();
        assert!(!console.is_silenced());
        {
            let _guard = console.silence();
            assert!(console.is_silenced());
        }
        assert!(!console.is_silenced());
    }

    #[test]
    fn test_silence_guard_restores_on_early_return() {
        fn failing_probe(console: &ConsoleSink) -> Result<(), ()> {
            let _guard = console.silence();
            Err(())
        }

        let console = ConsoleSink::new();
        assert!(failing_probe(&console).is_err());
        assert!(!console.is_silenced());
    }

    #[test]
    fn test_clone_shares_silencing_state() {
        let console = ConsoleSink::new();
        let handle = console.clone();
        let _guard = console.silence();
        assert!(handle.is_silenced());
    }

    #[test]
    fn test_silenced_write_discards_but_succeeds() {
        let console = ConsoleSink::new();
        let _guard = console.silence();
        let mut handle = console.clone();
        assert_eq!(handle.write(b"noise").unwrap(), 5);
    }
}
