use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub alerts: AlertsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub diag_out: DiagOutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            alerts: AlertsConfig::default(),
            logging: LoggingConfig::default(),
            diag_out: DiagOutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the todo application serving the task-list page.
    #[serde(default = "default_server_base_url")]
    pub base_url: String,

    /// Request timeout for the toggle endpoint.
    #[serde(default = "default_server_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_server_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_server_timeout_ms() -> u64 {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_server_base_url(),
            timeout_ms: default_server_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// How long a banner stays visible before the fade starts.
    #[serde(default = "default_alerts_display_ms")]
    pub display_ms: u64,

    /// Fade transition length; the banner is detached once it elapses.
    #[serde(default = "default_alerts_fade_ms")]
    pub fade_ms: u64,
}

fn default_alerts_display_ms() -> u64 {
    3_000
}

fn default_alerts_fade_ms() -> u64 {
    150
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            display_ms: default_alerts_display_ms(),
            fade_ms: default_alerts_fade_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskpage_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Where swallowed failures end up. Events always reach the tracing log;
/// `path` additionally appends them as JSON Lines ("stdout:" writes to
/// stdout, empty disables the file sink).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagOutConfig {
    pub enabled: bool,
    pub path: String,
    pub channel_capacity: usize,
    pub drop_when_full: bool,
}

impl Default for DiagOutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: String::new(),
            channel_capacity: 256,
            drop_when_full: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.server.timeout_ms, 10_000);
        assert_eq!(cfg.alerts.display_ms, 3_000);
        assert_eq!(cfg.alerts.fade_ms, 150);
        assert!(cfg.diag_out.enabled);
        assert!(cfg.diag_out.path.is_empty());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://todo.internal:8080/"

            [alerts]
            display_ms = 500
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.server.base_url, "http://todo.internal:8080/");
        assert_eq!(cfg.server.timeout_ms, 10_000);
        assert_eq!(cfg.alerts.display_ms, 500);
        assert_eq!(cfg.alerts.fade_ms, 150);
    }
}
