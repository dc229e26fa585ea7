//! Event logging for Zombie Plague modules
//!
//! Every event lands in `zp.log`; what reaches the console depends on the
//! verbosity level, the event type and the module filter. Logging a fatal event
//! only records it: stopping the host is left to whoever received the error.

use colored::Colorize;
use indicatif::ProgressBar;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static NO_STDOUT: Mutex<bool> = Mutex::new(false);
static MODULE_FILTER: Mutex<Vec<LogModule>> = Mutex::new(Vec::new());
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Severity of a logged event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Normal,
    Error,
    Fatal,
}

impl LogType {
    fn label(self) -> &'static str {
        match self {
            LogType::Normal => "INFO",
            LogType::Error => "ERROR",
            LogType::Fatal => "FATAL",
        }
    }
}

/// Module an event originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogModule {
    Config,
    Downloads,
    Engine,
}

impl LogModule {
    pub fn name(self) -> &'static str {
        match self {
            LogModule::Config => "Config",
            LogModule::Downloads => "Downloads",
            LogModule::Engine => "Engine",
        }
    }

    /// Parse a module name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        [LogModule::Config, LogModule::Downloads, LogModule::Engine]
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for LogModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Get whether stdout logging is disabled
pub fn get_no_stdout() -> bool {
    NO_STDOUT.lock().ok().map(|v| *v).unwrap_or(false)
}

/// Set whether stdout logging is disabled
pub fn set_no_stdout(disabled: bool) {
    if let Ok(mut v) = NO_STDOUT.lock() {
        *v = disabled;
    }
}

/// Restrict normal events to the given modules. An empty filter lets everything through.
pub fn set_module_filter(modules: Vec<LogModule>) {
    if let Ok(mut filter) = MODULE_FILTER.lock() {
        *filter = modules;
    }
}

/// Whether normal events from `module` pass the module filter
pub fn module_enabled(module: LogModule) -> bool {
    MODULE_FILTER
        .lock()
        .ok()
        .map_or(true, |filter| filter.is_empty() || filter.contains(&module))
}

/// Initialize the logger with a verbosity level and an optional log directory
pub fn init_with_verbosity(
    verbosity: u8,
    no_stdout: bool,
    log_dir: Option<&Path>,
) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }

    set_no_stdout(no_stdout);

    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_config_dir()?,
    };
    init(&log_dir)
}

fn init(log_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    let log_file = log_dir.join("zp.log");

    // Truncate log file on each run (overwrite instead of append)
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    let mut log_file_guard = LOG_FILE
        .lock()
        .map_err(|_| "Log file lock poisoned".to_string())?;
    *log_file_guard = Some(log_file);

    Ok(())
}

/// Get the config directory path
fn get_config_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let config_dir = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config")
        .join("zp");

    #[cfg(target_os = "windows")]
    let config_dir = dirs::config_dir()
        .ok_or("Could not determine config directory")?
        .join("zp");

    Ok(config_dir)
}

fn write_to_log(message: &str) {
    if let Ok(log_file_guard) = LOG_FILE.lock() {
        if let Some(ref log_path) = *log_file_guard {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{}] [ZP] {}", timestamp, message);
            }
        }
    }
}

/// Render an event the way it appears in the log file (without timestamp)
pub fn format_event(log_type: LogType, module: LogModule, tag: &str, message: &str) -> String {
    format!("{} [{}] [{}] {}", log_type.label(), module, tag, message)
}

/// Log a module event.
///
/// Normal events are dropped when the module filter excludes `module`, and
/// reach the console only at verbosity >= 1. Errors and fatal events are
/// always written and printed.
pub fn log_event(log_type: LogType, module: LogModule, tag: &str, message: &str) {
    if log_type == LogType::Normal && !module_enabled(module) {
        return;
    }

    write_to_log(&format_event(log_type, module, tag, message));

    let prefix = format!("[{}] [{}]", module, tag);
    match log_type {
        LogType::Normal => {
            if get_verbosity() >= 1 && !get_no_stdout() {
                eprintln!("{} {}", prefix.dimmed(), message);
            }
        }
        LogType::Error => {
            eprintln!("{} {} {}", "Error:".red().bold(), prefix.dimmed(), message);
        }
        LogType::Fatal => {
            eprintln!("{} {} {}", "Fatal:".red().bold(), prefix, message);
        }
    }
}

/// Log an informational message (to console if verbose >= 1, always to file)
pub fn info(message: &str) {
    write_to_log(&format!("INFO {}", message));
    if get_verbosity() >= 1 && !get_no_stdout() {
        eprintln!("{}", message);
    }
}

/// Log a debug message (to console if verbose >= 1, always to file)
pub fn debug(message: &str) {
    write_to_log(&format!("DEBUG {}", message));
    if get_verbosity() >= 1 && !get_no_stdout() {
        eprintln!("{} {}", "DEBUG:".blue().bold(), message);
    }
}

/// Log an error message (to both file and console)
pub fn error(message: &str) {
    write_to_log(&format!("ERROR {}", message));
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message
pub fn success(message: &str) {
    write_to_log(&format!("SUCCESS {}", message));
    if get_no_stdout() {
        return;
    }
    let check = "\u{2714}".green().bold();
    eprintln!("{} {}", check, message);
}

/// Log a step message
pub fn step(message: &str) {
    if get_verbosity() >= 2 {
        eprintln!("TRACE: {}", message);
    }
    write_to_log(&format!("STEP: {}", message));
}

/// Get the log file path for display
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

/// Print the log file path to the user
pub fn show_log_path() {
    if let Some(path) = get_log_path() {
        eprintln!("Log file: {}", path.display());
    } else if let Ok(config_dir) = get_config_dir() {
        eprintln!("Log file: {}", config_dir.join("zp.log").display());
    } else {
        eprintln!("Log file location not available");
    }
}

/// Start a spinner with the given message (only if not verbose)
pub fn spinner_start(message: &str) {
    if get_verbosity() > 0 || get_no_stdout() {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());

    if let Ok(mut spinner_guard) = SPINNER.lock() {
        *spinner_guard = Some(spinner);
    }
}

/// Stop the spinner without any message
pub fn spinner_stop() {
    if let Ok(mut spinner_guard) = SPINNER.lock() {
        if let Some(spinner) = spinner_guard.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_event() {
        let line = format_event(
            LogType::Error,
            LogModule::Downloads,
            "Config Validation",
            "Incorrect path \"sound/x\"",
        );
        assert_eq!(
            line,
            "ERROR [Downloads] [Config Validation] Incorrect path \"sound/x\""
        );
    }

    #[test]
    fn test_module_from_name() {
        assert_eq!(LogModule::from_name("downloads"), Some(LogModule::Downloads));
        assert_eq!(LogModule::from_name(" ENGINE "), Some(LogModule::Engine));
        assert_eq!(LogModule::from_name("sounds"), None);
    }

    // Logger state is global; keep everything that touches it in one test.
    #[test]
    fn test_events_written_to_log_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(init_with_verbosity(0, true, Some(temp_dir.path())).is_ok());
        assert_eq!(get_log_path(), Some(temp_dir.path().join("zp.log")));

        set_module_filter(vec![LogModule::Engine]);
        assert!(!module_enabled(LogModule::Downloads));
        log_event(LogType::Normal, LogModule::Downloads, "Tag", "filtered out");
        log_event(LogType::Error, LogModule::Downloads, "Tag", "kept error");

        set_module_filter(Vec::new());
        assert!(module_enabled(LogModule::Downloads));
        log_event(LogType::Normal, LogModule::Downloads, "Tag", "kept normal");

        let content = fs::read_to_string(temp_dir.path().join("zp.log")).unwrap_or_default();
        assert!(!content.contains("filtered out"));
        assert!(content.contains("ERROR [Downloads] [Tag] kept error"));
        assert!(content.contains("INFO [Downloads] [Tag] kept normal"));
        assert!(content.contains("[ZP]"));
    }
}
