//! Operator-facing status line per file
//!
//! `[<status>] <path>` with ANSI colour. In verbose mode every status gets
//! its own line; otherwise the current line is rewritten in place.

use crate::models::ProcessResult;
use std::io::Write;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const ERASE_LINE: &str = "\x1b[K";

pub struct Progress<W: Write> {
    out: W,
    verbose: bool,
}

impl Progress<std::io::Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(std::io::stdout(), verbose)
    }
}

impl<W: Write> Progress<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Begin a new status line
    pub fn start(&mut self, msg: &str) {
        self.emit(format_args!("\n"));
        self.update(msg, "...", RESET);
    }

    /// Rewrite the current status line
    pub fn update(&mut self, msg: &str, status: &str, colour: &str) {
        if self.verbose {
            self.emit(format_args!("{}[{:<10}]{} {}\n", colour, status, RESET, msg));
        } else {
            self.emit(format_args!(
                "{}[{:<10}]{} {}{}\r",
                colour, status, RESET, msg, ERASE_LINE
            ));
        }
    }

    /// Final status for one file, plus any failure detail in full
    pub fn report(&mut self, path: &str, result: &ProcessResult) {
        let colour = if result.is_good() { GREEN } else { RED };
        self.update(path, &result.status_label(), colour);

        if let Some(detail) = result.detail() {
            self.emit(format_args!("\n{}\n", detail));
        }
    }

    /// Leave the cursor on a fresh line
    pub fn finish(&mut self) {
        self.emit(format_args!("\n"));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        // Console output is best effort
        let _ = self.out.write_fmt(args);
        let _ = self.out.flush();
    }
}
