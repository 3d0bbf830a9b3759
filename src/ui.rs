use console::{Term, style};
use std::{env, fmt::Display};

use crate::report::DiagnosticSink;

/// Small output helper:
/// - inspect mode: human output to stdout, errors to stderr
/// - rewrite / `--json` mode: ALL human output to stderr (stdout stays
///   reserved for rewritten text or the JSON report)
/// - fancy styling only on a real TTY and when NO_COLOR/CI are not set
#[derive(Debug, Clone)]
pub struct Ui {
    out: Term,
    err: Term,
    fancy: bool,
    enabled: bool,

    // Observability hooks used by unit tests; they do not affect formatting.
    emitted: u64,
    file_errors: u64,
}

impl Ui {
    /// `reserve_stdout` routes all human output to stderr.
    pub fn new(reserve_stdout: bool) -> Self {
        let out = if reserve_stdout {
            Term::stderr()
        } else {
            Term::stdout()
        };
        let err = Term::stderr();

        // Fancy output must only activate when the stream actually used for
        // human output is a TTY.
        let out_is_tty = out.is_term();

        let no_color = env::var_os("NO_COLOR").is_some();
        let in_ci = env::var_os("CI").is_some();

        let fancy = out_is_tty && !no_color && !in_ci;

        Self {
            out,
            err,
            fancy,
            enabled: true,
            emitted: 0,
            file_errors: 0,
        }
    }

    /// Useful for unit tests to avoid noisy output.
    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            fancy: false,
            enabled: false,
            emitted: 0,
            file_errors: 0,
        }
    }

    fn write_out(&self, s: &str) {
        if self.enabled {
            let _ = self.out.write_line(s);
        }
    }

    fn write_err(&self, s: &str) {
        if self.enabled {
            let _ = self.err.write_line(s);
        }
    }

    pub fn line(&self, msg: impl Display) {
        self.write_out(&msg.to_string());
    }

    pub fn title(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_out(&style(s).bold().to_string());
        } else {
            self.write_out(&s);
        }
    }

    pub fn error(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_err(&style(s).red().bold().to_string());
        } else {
            self.write_err(&s);
        }
    }

    /// Used for per-file failures; keeps stderr/stdout routing consistent.
    pub fn file_error(&mut self, msg: impl Display) {
        self.file_errors += 1;
        self.error(msg);
    }

    #[allow(dead_code)]
    pub fn is_fancy(&self) -> bool {
        self.fancy && self.enabled
    }
}

impl DiagnosticSink for Ui {
    fn emit(&mut self, line: &str) {
        self.emitted += 1;
        self.line(line);
    }
}
