//! A small `log` backend for applications that render layouts.
//!
//! The library only emits records through the `log` macros; nothing is
//! printed unless the application installs a logger. [`FlexLogger`] is a
//! ready-made one that writes `time LEVEL message` lines to stderr (or any
//! [`Write`] sink), with the level colored when a color system is set.

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::macros::format_description;
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::color::ColorSystem;
use crate::style::Style;
use crate::sync::lock_recover;

/// Line-oriented logger for the `log` crate.
///
/// # Thread Safety
///
/// The sink and the last printed timestamp are each guarded by a mutex with
/// poison recovery, so records from several threads never interleave within a
/// line.
pub struct FlexLogger {
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    color_system: Option<ColorSystem>,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl FlexLogger {
    /// Create a logger writing to stderr with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Create a logger writing to an arbitrary sink.
    #[must_use]
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        let time_format = OwnedFormatItem::from(format_description!("[hour]:[minute]:[second]"));
        Self {
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: true,
            show_level: true,
            show_target: false,
            color_system: None,
            time_format,
            last_time: Mutex::new(None),
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp identical to the previous line's.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Append the record target (module path) to each line.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Color the level column using the given color system.
    #[must_use]
    pub fn color_system(mut self, color_system: Option<ColorSystem>) -> Self {
        self.color_system = color_system;
        self
    }

    /// Override time format (`time` crate format description syntax).
    ///
    /// An invalid description leaves the current format in place.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if another logger was already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_style(level: Level) -> Style {
        match level {
            Level::Trace => Style::parse("dim").unwrap_or_default(),
            Level::Debug => Style::parse("blue dim").unwrap_or_default(),
            Level::Info => Style::parse("green").unwrap_or_default(),
            Level::Warn => Style::parse("yellow").unwrap_or_default(),
            Level::Error => Style::parse("bold red").unwrap_or_default(),
        }
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    line.push_str(&" ".repeat(time_str.len()));
                } else {
                    line.push_str(&time_str);
                    *last = Some(time_str);
                }
            } else {
                line.push_str(&time_str);
            }
            line.push(' ');
        }

        if self.show_level {
            let padded = format!("{:<5}", record.level());
            match self.color_system {
                Some(system) => line.push_str(&Self::level_style(record.level()).render(&padded, system)),
                None => line.push_str(&padded),
            }
            line.push(' ');
        }

        line.push_str(&record.args().to_string());

        if self.show_target && !record.target().is_empty() {
            line.push_str(" [");
            line.push_str(record.target());
            line.push(']');
        }

        line
    }
}

impl Default for FlexLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for FlexLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        let mut sink = lock_recover(&self.sink);
        // A failed write has nowhere to be reported.
        let _ = writeln!(sink, "{line}");
    }

    fn flush(&self) {
        let _ = lock_recover(&self.sink).flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&lock_recover(&self.0)).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            lock_recover(&self.0).extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn emit(logger: &FlexLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target("flexstack::flex")
                .build(),
        );
    }

    #[test]
    fn test_plain_line_without_time() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone()).show_time(false);
        emit(&logger, Level::Info, "laid out 3 items");
        assert_eq!(buffer.contents(), "INFO  laid out 3 items\n");
    }

    #[test]
    fn test_level_filter() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone())
            .show_time(false)
            .level(LevelFilter::Warn);
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Warn, "shown");
        assert_eq!(buffer.contents(), "WARN  shown\n");
    }

    #[test]
    fn test_target_suffix() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone())
            .show_time(false)
            .show_level(false)
            .show_target(true);
        emit(&logger, Level::Info, "clamped");
        assert_eq!(buffer.contents(), "clamped [flexstack::flex]\n");
    }

    #[test]
    fn test_colored_level() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone())
            .show_time(false)
            .color_system(Some(ColorSystem::Standard));
        emit(&logger, Level::Warn, "careful");
        assert_eq!(buffer.contents(), "\x1b[33mWARN \x1b[0m careful\n");
    }

    #[test]
    fn test_repeated_time_is_blanked() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone())
            .show_level(false)
            .time_format("[year]");
        emit(&logger, Level::Info, "one");
        emit(&logger, Level::Info, "two");
        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" one"));
        assert_eq!(lines[1], "     two");
    }

    #[test]
    fn test_default_time_format() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone()).show_level(false);
        emit(&logger, Level::Info, "tick");
        let contents = buffer.contents();
        let (time, rest) = contents.split_at(8);
        assert_eq!(rest, " tick\n");
        let fields: Vec<&str> = time.split(':').collect();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.len() == 2 && f.bytes().all(|b| b.is_ascii_digit())));
    }

    #[test]
    fn test_invalid_time_format_is_ignored() {
        let buffer = SharedBuffer::default();
        let logger = FlexLogger::with_writer(buffer.clone())
            .show_level(false)
            .omit_repeated_times(false)
            .time_format("[nonsense")
            .time_format("[year]");
        emit(&logger, Level::Info, "x");
        let contents = buffer.contents();
        assert_eq!(contents.len(), "2026 x\n".len());
    }
}
