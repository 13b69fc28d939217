//! Level-tagged logging: browser console on wasm32, stderr elsewhere.

#[cfg(target_arch = "wasm32")]
pub fn write_log(level: &str, msg: &str) {
    let line = format!("[{level}] {msg}");
    match level {
        "ERROR" => web_sys::console::error_1(&line.into()),
        "WARN" => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_log(level: &str, msg: &str) {
    eprintln!("[{level}] {msg}");
}

/// Milliseconds timestamp for perf lines
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write_log("INFO", &format!($($arg)*)) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write_log("WARN", &format!($($arg)*)) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write_log("ERROR", &format!($($arg)*)) };
}
