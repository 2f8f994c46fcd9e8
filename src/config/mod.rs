use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use lazy_static::lazy_static;

/// Scheduling policies that are deliberate choices rather than algorithm
/// constants. Loaded once from schedule.toml in the app data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// A plan whose end date equals its start date spans zero whole days and
    /// normally yields no tasks. Setting this treats such a range as one day.
    #[serde(default)]
    pub zero_day_plan_single_day: bool,
    /// Number of ladder entries seeded when a review schedule is appended
    /// for a completed task.
    #[serde(default = "default_repetitions")]
    pub default_repetitions: i32,
}

fn default_repetitions() -> i32 {
    5
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            zero_day_plan_single_day: false,
            default_repetitions: 5,
        }
    }
}

/// Root directory for all persisted records. The CHESSCOACH_DATA_DIR
/// environment variable takes precedence so tests and portable installs can
/// relocate the store.
pub fn data_root() -> PathBuf {
    if let Some(dir) = std::env::var_os("CHESSCOACH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/com.chesscoach.app");
            dir.push("data");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("com.chesscoach.app");
            dir.push("data");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/com.chesscoach.app");
            dir.push("data");
            return dir;
        }
    }

    // Fallback
    PathBuf::from("data")
}

fn get_config_path() -> PathBuf {
    data_root().join("schedule.toml")
}

fn load_schedule_config_internal() -> ScheduleConfig {
    let config_path = get_config_path();

    // Try to load from config file
    if let Ok(content) = fs::read_to_string(&config_path) {
        if let Ok(config) = toml::from_str::<ScheduleConfig>(&content) {
            eprintln!("[Config] Loaded schedule config from: {:?}", config_path);
            return config;
        } else {
            eprintln!("[Config] Failed to parse schedule.toml, using defaults");
        }
    }

    // Return defaults if file doesn't exist or parsing fails
    ScheduleConfig::default()
}

lazy_static! {
    static ref SCHEDULE_CONFIG: ScheduleConfig = load_schedule_config_internal();
}

/// Get the cached schedule configuration (loaded once at startup)
pub fn get_schedule_config() -> &'static ScheduleConfig {
    &SCHEDULE_CONFIG
}
