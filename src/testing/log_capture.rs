//! In-memory `tracing` output capture

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log output in a shared buffer
///
/// # Examples
///
/// ```
/// use addnums::testing::LogCapture;
///
/// let logs = LogCapture::new();
/// logs.capture(|| tracing::info!("hello"));
/// assert!(logs.contents().contains("hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with a subscriber writing into this capture
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::subscriber::with_default(self.subscriber(), f)
    }

    /// Install this capture as the thread's default subscriber until the
    /// guard is dropped. Suited to `#[tokio::test]` on the current-thread
    /// runtime, where `capture` cannot span an `.await`.
    pub fn set_default(&self) -> DefaultGuard {
        tracing::subscriber::set_default(self.subscriber())
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.buffer)).into_owned()
    }

    /// Written output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .with_target(false)
            .with_ansi(false)
            .finish()
    }
}

/// Writer handed out per event by [`LogCapture`]
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.buffer).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

// A panicking test may poison the lock; the bytes are still usable.
fn lock(buffer: &Mutex<Vec<u8>>) -> MutexGuard<'_, Vec<u8>> {
    buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info};

    #[test]
    fn test_capture_records_levels_and_messages() {
        let logs = LogCapture::new();
        logs.capture(|| {
            info!("first");
            error!("second");
        });
        let lines = logs.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].ends_with("first"));
        assert!(lines[1].contains("ERROR") && lines[1].ends_with("second"));
    }

    #[test]
    fn test_nothing_captured_outside_scope() {
        let logs = LogCapture::new();
        info!("not captured");
        assert!(logs.contents().is_empty());
    }

    #[test]
    fn test_guard_scope() {
        let logs = LogCapture::new();
        {
            let _guard = logs.set_default();
            info!("inside");
        }
        info!("outside");
        assert_eq!(logs.lines().len(), 1);
    }
}
