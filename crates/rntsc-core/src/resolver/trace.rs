//! Buffered resolution tracing.
//!
//! Each resolution attempt runs inside a trace transaction: records are
//! buffered from `begin` until `end_success`/`end_failure`, then flushed or
//! dropped depending on the configured mode. This keeps failure-only tracing
//! from interleaving half-finished attempts into the sink.

use std::io::Write;
use std::path::PathBuf;

use crate::error::Error;

/// When buffered trace records reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    /// Drop everything; the sink is never written.
    #[default]
    Never,
    /// Flush every transaction, successful or not.
    Always,
    /// Flush only transactions that end in failure.
    OnFailure,
}

/// Where flushed trace records go.
#[derive(Debug, Clone)]
pub enum TraceSink {
    Stdout,
    /// Append-only UTF-8 file, opened per flush so concurrent drivers
    /// interleave whole records rather than partial ones.
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceState {
    Idle,
    Buffering,
}

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Buffered trace log for one resolver instance.
///
/// A `log` call outside a transaction is a self-contained transaction: the
/// record is appended and the buffer immediately ends with success.
#[derive(Debug)]
pub struct TraceLog {
    mode: TraceMode,
    sink: TraceSink,
    state: TraceState,
    buffer: Vec<String>,
}

impl TraceLog {
    #[must_use]
    pub fn new(mode: TraceMode, sink: TraceSink) -> Self {
        Self {
            mode,
            sink,
            state: TraceState::Idle,
            buffer: Vec::new(),
        }
    }

    /// Open a trace transaction.
    pub fn begin(&mut self) {
        self.state = TraceState::Buffering;
    }

    /// Append one record to the current transaction.
    ///
    /// Outside a transaction the record forms a standalone transaction that
    /// ends with implicit success, so in `Always` mode it flushes right away.
    pub fn log(&mut self, record: impl Into<String>) -> Result<(), Error> {
        if self.mode == TraceMode::Never {
            return Ok(());
        }
        self.buffer.push(record.into());
        if self.state == TraceState::Idle {
            self.end_success()?;
        }
        Ok(())
    }

    /// Close the transaction as a success. Flushes only in `Always` mode.
    pub fn end_success(&mut self) -> Result<(), Error> {
        if self.mode == TraceMode::Always {
            self.flush()?;
        }
        self.reset();
        Ok(())
    }

    /// Close the transaction as a failure. Flushes unless mode is `Never`.
    pub fn end_failure(&mut self) -> Result<(), Error> {
        if matches!(self.mode, TraceMode::Always | TraceMode::OnFailure) {
            self.flush()?;
        }
        self.reset();
        Ok(())
    }

    /// Drop the buffered records and return to idle.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = TraceState::Idle;
    }

    fn flush(&mut self) -> Result<(), Error> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let mut payload = self.buffer.join(LINE_SEPARATOR);
        payload.push_str(LINE_SEPARATOR);

        match &self.sink {
            TraceSink::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(payload.as_bytes())?;
            }
            TraceSink::File(path) => {
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| Error::TraceSink {
                        path: path.clone(),
                        source,
                    })?;
                file.write_all(payload.as_bytes())
                    .map_err(|source| Error::TraceSink {
                        path: path.clone(),
                        source,
                    })?;
            }
        }

        Ok(())
    }
}
