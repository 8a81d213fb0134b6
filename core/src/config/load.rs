use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskpage data directory: ~/.taskpage
pub fn get_taskpage_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskpage"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskpage/config.toml (highest)
    let taskpage_dir = get_taskpage_data_dir()?;
    let taskpage_config = taskpage_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if taskpage_config.exists() {
        let s = std::fs::read_to_string(&taskpage_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Update logging directory to use taskpage data directory if not set
    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        let logs_dir = taskpage_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("TASKPAGE_SERVER_URL") {
        if !v.trim().is_empty() {
            cfg.server.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("TASKPAGE_DIAG_PATH") {
        if !v.trim().is_empty() {
            cfg.diag_out.path = v;
        }
    }

    Ok(cfg)
}
