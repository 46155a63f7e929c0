use log::{Level, LevelFilter, Log, Metadata, Record};

/// Routes the `log` facade to the browser console
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Install the console logger; a second call is a no-op
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Component is the last segment of the module path
fn component(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, component(target), message)
}
