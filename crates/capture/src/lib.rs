// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation capture and recording.
//!
//! Every run of the pipeline under test is recorded here with its argument
//! vector and outcome, so a failing suite can be replayed or inspected after
//! the temporary working directories are gone.

mod duration_serde;
mod interaction;
mod log;

pub use interaction::{CapturedArgs, CapturedInvocation, CapturedOutcome};
pub use log::CaptureLog;
