use std::io::Write;
use std::sync::Mutex;

/// Append-only target for per-retry diagnostic lines.
///
/// Receives one line (without trailing newline) after each failed attempt
/// that will be retried; nothing is appended for the final attempt or for a
/// non-retryable failure.
pub trait DiagnosticSink: Send + Sync {
    fn append(&self, line: &str);
}

/// The default sink: drops every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl DiagnosticSink for DiscardSink {
    fn append(&self, _line: &str) {}
}

/// Adapter writing each line, newline-terminated, to any `io::Write`.
///
/// Writes are serialized by an internal lock; write errors are swallowed,
/// diagnostics are best-effort.
pub struct WriteSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> DiagnosticSink for WriteSink<W> {
    fn append(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}
