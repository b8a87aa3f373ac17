//! Stderr logger for the `log` facade
//!
//! Lines look like `dirtree: warning: cannot list src: permission denied`.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct StderrLogger {
    level: LevelFilter,
    use_color: bool,
}

impl StderrLogger {
    pub fn new(level: LevelFilter, use_color: bool) -> Self {
        Self { level, use_color }
    }

    /// Install as the global logger: `warn` by default, `debug` when verbose.
    /// Installing twice is a no-op.
    pub fn init(verbose: bool, use_color: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        if log::set_boxed_logger(Box::new(Self::new(level, use_color))).is_ok() {
            log::set_max_level(level);
        }
    }
}

fn label(level: Level) -> (&'static str, Color) {
    match level {
        Level::Error => ("error", Color::Red),
        Level::Warn => ("warning", Color::Yellow),
        Level::Info => ("info", Color::Green),
        Level::Debug => ("debug", Color::Cyan),
        Level::Trace => ("trace", Color::Magenta),
    }
}

/// Format one line without colors.
pub fn format_line(level: Level, message: &str) -> String {
    format!("dirtree: {}: {}", label(level).0, message)
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let choice = if self.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stderr = StandardStream::stderr(choice);
        let (name, color) = label(record.level());
        // Nowhere to report a failing stderr.
        let _ = write!(stderr, "dirtree: ");
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(stderr, "{}", name);
        let _ = stderr.reset();
        let _ = writeln!(stderr, ": {}", record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
