// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared invocation log with an optional JSONL sink.

use crate::interaction::{CapturedArgs, CapturedInvocation, CapturedOutcome};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

struct LogState {
    next_seq: u64,
    invocations: Vec<CapturedInvocation>,
    sink: Option<BufWriter<File>>,
    /// First sink failure; later writes are skipped
    sink_error: Option<io::Error>,
}

impl LogState {
    fn write_line(&mut self, invocation: &CapturedInvocation) {
        if self.sink_error.is_some() {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let result = serde_json::to_writer(&mut *sink, invocation)
            .map_err(io::Error::from)
            .and_then(|()| sink.write_all(b"\n"))
            .and_then(|()| sink.flush());
        if let Err(e) = result {
            self.sink_error = Some(e);
        }
    }
}

/// Log of pipeline invocations, shared by every clone.
///
/// Recording and writing the JSONL line happen under one lock, so lines in
/// the file appear in `seq` order even when scenarios run concurrently.
#[derive(Clone)]
pub struct CaptureLog {
    start: Instant,
    state: Arc<Mutex<LogState>>,
}

impl CaptureLog {
    /// In-memory log only.
    pub fn new() -> Self {
        Self::with_sink(None)
    }

    /// Log that also appends one JSON object per line to `path`.
    pub fn with_file(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_sink(Some(BufWriter::new(file))))
    }

    fn with_sink(sink: Option<BufWriter<File>>) -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(LogState {
                next_seq: 0,
                invocations: Vec::new(),
                sink,
                sink_error: None,
            })),
        }
    }

    /// Record one invocation and return its sequence number.
    pub fn record(&self, args: CapturedArgs, outcome: CapturedOutcome) -> u64 {
        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;

        let invocation = CapturedInvocation {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            args,
            outcome,
        };
        state.write_line(&invocation);
        state.invocations.push(invocation);
        seq
    }

    /// Report the first JSONL write failure, if any, after flushing.
    pub fn flush(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        if let Some(e) = state.sink_error.take() {
            return Err(e);
        }
        match state.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    pub fn invocations(&self) -> Vec<CapturedInvocation> {
        self.state.lock().invocations.clone()
    }

    /// The most recent `n` invocations, oldest first.
    pub fn last(&self, n: usize) -> Vec<CapturedInvocation> {
        let state = self.state.lock();
        let skip = state.invocations.len().saturating_sub(n);
        state.invocations[skip..].to_vec()
    }

    pub fn count<F: Fn(&CapturedInvocation) -> bool>(&self, pred: F) -> usize {
        self.state.lock().invocations.iter().filter(|i| pred(i)).count()
    }

    /// Invocations made on behalf of `scenario`.
    pub fn find_by_scenario(&self, scenario: &str) -> Vec<CapturedInvocation> {
        self.select(|i| i.args.scenario == scenario)
    }

    /// Invocations that did not exit cleanly with status 0.
    pub fn find_failures(&self) -> Vec<CapturedInvocation> {
        self.select(|i| i.outcome.is_failure())
    }

    pub fn len(&self) -> usize {
        self.state.lock().invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().invocations.is_empty()
    }

    /// Forget recorded invocations. Sequence numbers keep counting and lines
    /// already written to the file stay there.
    pub fn clear(&self) {
        self.state.lock().invocations.clear();
    }

    fn select<F: Fn(&CapturedInvocation) -> bool>(&self, pred: F) -> Vec<CapturedInvocation> {
        self.state
            .lock()
            .invocations
            .iter()
            .filter(|i| pred(i))
            .cloned()
            .collect()
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
