//! The diagnostic sink: the append-only operational record of the run.
//!
//! This is distinct from `tracing` telemetry — the diagnostic log is the
//! contract surface callers consult for per-order outcomes, so every record
//! is one complete timestamped line and the file is never truncated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

/// Append-only sink for operational events (errors, notices, confirmations).
pub trait DiagnosticSink: Send + Sync {
    /// Record one event. Must never fail the caller.
    fn record(&self, message: &str);
}

/// File-backed sink writing `<timestamp>   <message>` lines, one per record.
pub struct FileSink {
    path: PathBuf,
    // Serializes writers so interleaved records never corrupt a line.
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

impl DiagnosticSink for FileSink {
    fn record(&self, message: &str) {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("{timestamp}   {message}");

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));

        if let Err(e) = result {
            // The sink must not fail the run; fall back to telemetry.
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write diagnostic record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.log");
        let sink = FileSink::new(&path);

        sink.record("Start of run");
        sink.record("End of run");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Start of run"));
        assert!(lines[1].ends_with("End of run"));
    }

    #[test]
    fn never_truncates_across_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.log");

        FileSink::new(&path).record("first run");
        FileSink::new(&path).record("second run");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first run"));
        assert!(contents.contains("second run"));
    }
}
