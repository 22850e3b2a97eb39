//! Log capture for tests.
//!
//! Installs a thread-local `tracing` subscriber with an explicit filter, so
//! tests neither read `RUST_LOG` nor race on the global dispatcher.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Collected log output. Capture stops when this value is dropped.
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
    _guard: DefaultGuard,
}

impl LogCapture {
    /// Everything logged on this thread since capture began.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Capture events on the current thread that pass `filter`.
///
/// # Examples
///
/// ```rust
/// use test_support::capture_logs;
///
/// let logs = capture_logs("debug");
/// tracing::debug!(key = "PORT", "bound field");
/// assert!(logs.contents().contains("PORT"));
/// ```
pub fn capture_logs(filter: &str) -> LogCapture {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(BufMakeWriter { buf: buf.clone() })
        .with_ansi(false)
        .finish();
    LogCapture {
        buf,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}

#[derive(Clone)]
struct BufMakeWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufMakeWriter {
    type Writer = BufWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufWriter {
            buf: self.buf.clone(),
        }
    }
}

struct BufWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for BufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
