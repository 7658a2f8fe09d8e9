use std::path::Path;
use std::time::Duration;

use prelovium_lib::{Config, PreloviumError};

/// Environment variable that overrides the configured server URL.
pub const SERVER_ENV: &str = "PRELOVIUM_SERVER";

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/prelovium/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, PreloviumError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        PreloviumError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        PreloviumError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Server URL: `--server` > `PRELOVIUM_SERVER` > config file.
pub fn resolve_server_url(cli: Option<&str>, env: Option<String>, config: &Config) -> String {
    cli.map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| env.filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| config.server.url.clone())
}

pub fn server_from_env() -> Option<String> {
    std::env::var(SERVER_ENV).ok()
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    server: &str,
    timeout: Option<Duration>,
    config: &Config,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let timeout = timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Effective config [{source}]: server={}, timeout={}, currency={}, examples={}",
        server,
        timeout,
        config.render.currency_symbol,
        config.examples.len()
    )
}

/// Log effective config (visible with --verbose).
pub fn log_effective_config(server: &str, config: &Config, config_source: Option<&Path>) {
    tracing::debug!(
        "{}",
        format_effective_config(server, config.server.timeout, config, config_source)
    );
}
