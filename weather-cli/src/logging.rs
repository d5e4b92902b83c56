use std::{fs::OpenOptions, sync::Mutex};
use tracing_subscriber::EnvFilter;
use weather_core::Config;

/// Install a file-backed subscriber. Logging is best effort: any failure to
/// open the log file leaves tracing disabled rather than aborting startup.
///
/// The terminal belongs to the widget, so nothing is written to stdout/stderr.
pub fn init(config: &Config) {
    let Ok(path) = Config::log_file_path() else {
        return;
    };

    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_new(config.log_level()).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
