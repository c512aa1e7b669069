use std::io::Write;
use std::sync::Mutex;
use chrono::Utc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Line-oriented logger writing text or JSON records.
///
/// Values of sensitive keys are replaced before they reach the sink.
pub struct Logger {
    out: Mutex<Box<dyn Write + Send>>,
    json_mode: bool,
    min_level: Level,
}

impl Logger {
    pub fn new(out: Box<dyn Write + Send>, json_mode: bool, min_level: Level) -> Self {
        Self {
            out: Mutex::new(out),
            json_mode,
            min_level,
        }
    }

    pub fn stderr(json_mode: bool, debug: bool) -> Self {
        let min_level = if debug { Level::Debug } else { Level::Info };
        Self::new(Box::new(std::io::stderr()), json_mode, min_level)
    }

    fn format_record(&self, level: Level, msg: &str, kvs: &[(&str, &str)]) -> String {
        let time = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let fields = kvs.iter().map(|(k, v)| (*k, redact_value(k, v)));

        if self.json_mode {
            let mut record = serde_json::json!({
                "time": time,
                "level": level.as_str(),
                "msg": msg,
            });
            if let serde_json::Value::Object(map) = &mut record {
                for (k, v) in fields {
                    map.insert(k.to_string(), v.into());
                }
            }
            record.to_string()
        } else {
            fields.fold(
                format!("{} [{}] {}", time, level.as_str(), msg),
                |line, (k, v)| format!("{} {}={}", line, k, v),
            )
        }
    }

    fn log(&self, level: Level, msg: &str, kvs: &[(&str, &str)]) {
        if level < self.min_level {
            return;
        }
        let record = self.format_record(level, msg, kvs);
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", record);
        }
    }

    pub fn debug(&self, msg: &str, kvs: &[(&str, &str)]) { self.log(Level::Debug, msg, kvs); }
    pub fn info(&self, msg: &str, kvs: &[(&str, &str)]) { self.log(Level::Info, msg, kvs); }
    pub fn warn(&self, msg: &str, kvs: &[(&str, &str)]) { self.log(Level::Warn, msg, kvs); }
    pub fn error(&self, msg: &str, kvs: &[(&str, &str)]) { self.log(Level::Error, msg, kvs); }
}

const SENSITIVE_KEYS: &[&str] = &["secret", "token", "authorization", "auth"];

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("password") || SENSITIVE_KEYS.contains(&key.as_str())
}

/// Replaces the value of a sensitive key (any `*password*` key, among others).
pub fn redact_value(key: &str, value: &str) -> String {
    match (is_sensitive(key), value.is_empty()) {
        (true, false) => "REDACTED".into(),
        _ => value.into(),
    }
}
