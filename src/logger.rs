use log::LevelFilter;

/// Routes `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
pub struct ConsoleLogger {
    level: LevelFilter,
}

#[cfg(target_arch = "wasm32")]
impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        ConsoleLogger { level }
    }
}

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        use log::Level;
        use wasm_bindgen::JsValue;
        use web_sys::console;

        if !self.enabled(record.metadata()) {
            return;
        }
        let value = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&value),
            Level::Warn => console::warn_1(&value),
            _ => console::log_1(&value),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. Later calls keep the first logger.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(ConsoleLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}

/// Off the web (tests, autoplay from a native host) records go through
/// `env_logger`, so `RUST_LOG` still overrides the configured level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init();
}
