use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: LogLevel,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Minimum-level filter handed to every page module.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn debug(self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(self, event: &str, fields: serde_json::Value) {
        self.event(LogLevel::Warn, event, fields);
    }

    pub fn event(self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if !self.enabled(level) {
            return;
        }

        let line = render_record(now_unix_millis(), level, event, fields);
        emit(level, &line);
    }
}

/// Renders one log line. Non-object `fields` are dropped.
pub fn render_record(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let fields = match fields {
        serde_json::Value::Object(extra) => extra,
        _ => serde_json::Map::new(),
    };

    let record = LogRecord {
        ts,
        level,
        event,
        fields,
    };

    serde_json::to_string(&record).unwrap_or_else(|_| format!("{{\"event\":\"{event}\"}}"))
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::info_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn logger_filters_below_minimum() {
        let logger = Logger::new(LogLevel::Info);

        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn parse_accepts_mixed_case_and_rejects_unknown() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }

    #[test]
    fn record_flattens_fields_next_to_envelope() {
        let line = render_record(
            1_700,
            LogLevel::Warn,
            "module_failed",
            json!({ "module": "hero", "error": "no context" }),
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");

        assert_eq!(parsed["ts"], 1_700);
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["event"], "module_failed");
        assert_eq!(parsed["module"], "hero");
        assert_eq!(parsed["error"], "no context");
    }

    #[test]
    fn record_ignores_non_object_fields() {
        let line = render_record(0, LogLevel::Info, "module_ready", json!("hero"));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");

        assert_eq!(parsed.as_object().map(|map| map.len()), Some(3));
    }
}
