//! `log` backend writing to the browser console.

use std::str::FromStr;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::types::js_error;

/// Forwards `log` records to `console.error/warn/info/debug`.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = format_record(record.level(), record.target(), &record.args().to_string());
        let message = JsValue::from_str(&text);
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

fn parse_level(level: &str) -> Result<LevelFilter, log::ParseLevelError> {
    LevelFilter::from_str(level.trim())
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level).map_err(js_error)?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level(" DEBUG ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Warn, "imagekit_core::batch", "a.png: failed"),
            "[WARN imagekit_core::batch] a.png: failed"
        );
    }
}
