// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic and verdict output.
//!
//! Diagnostics go to stderr and scenario verdicts to stdout, so the verdict
//! stream stays clean when piped. Colors are used only on a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";

/// How a line is labelled and colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Error,
    Warning,
    Status,
    Pass,
    Fail,
}

impl Tone {
    fn color(self) -> &'static str {
        match self {
            Tone::Error | Tone::Fail => "\x1b[31m",
            Tone::Warning => "\x1b[33m",
            Tone::Status => "\x1b[2m",
            Tone::Pass => "\x1b[32m",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tone::Error => "Error: ",
            Tone::Warning => "Warning: ",
            Tone::Status => "",
            Tone::Pass => "PASS",
            Tone::Fail => "FAIL",
        }
    }

    /// Verdicts color only the label; diagnostics color the whole line.
    fn is_verdict(self) -> bool {
        matches!(self, Tone::Pass | Tone::Fail)
    }
}

fn write_line<W: Write>(writer: &mut W, tone: Tone, msg: impl Display, is_terminal: bool) {
    let (color, reset) = if is_terminal {
        (tone.color(), RESET)
    } else {
        ("", "")
    };
    let label = tone.label();
    let _ = if tone.is_verdict() {
        writeln!(writer, "{color}{label}{reset} {msg}")
    } else {
        writeln!(writer, "{color}{label}{msg}{reset}")
    };
}

fn to_stderr(tone: Tone, msg: impl Display) {
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    write_line(&mut stderr.lock(), tone, msg, is_tty);
}

/// Print an error message to stderr, red on a terminal.
pub fn print_error(msg: impl Display) {
    to_stderr(Tone::Error, msg);
}

/// Print a warning message to stderr, yellow on a terminal.
pub fn print_warning(msg: impl Display) {
    to_stderr(Tone::Warning, msg);
}

/// Print a progress note to stderr, dimmed on a terminal.
pub fn print_status(msg: impl Display) {
    to_stderr(Tone::Status, msg);
}

/// Print a `PASS` or `FAIL` line to stdout.
pub fn print_verdict(passed: bool, msg: impl Display) {
    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let tone = if passed { Tone::Pass } else { Tone::Fail };
    write_line(&mut stdout.lock(), tone, msg, is_tty);
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
