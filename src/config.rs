use std::path::PathBuf;

/// Command-line session configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// File the move history is written to on exit.
    pub history_path: PathBuf,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            history_path: std::env::var_os("CHESS_HISTORY_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            log_filter: std::env::var("CHESS_LOG")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            history_path: PathBuf::from("szachy.txt"),
            log_filter: "chess_rules=info".to_string(),
        }
    }
}
