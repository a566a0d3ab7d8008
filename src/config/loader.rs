use crate::Result;
use crate::config::types::ReporterConfig;
use crate::error::ReportError;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    const CONFIG_FILE: &'static str = "runreport.toml";

    /// Load a configuration file from an explicit path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ReporterConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config: ReporterConfig = toml::from_str(&content)?;
        Self::expand_env(&mut config);
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load the configuration used by the CLI.
    ///
    /// An explicit path must exist. Otherwise look in the current directory
    /// and its parents, then in `~/.config/runreport/`, then fall back to
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<ReporterConfig> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::find_and_load() {
            Some(config) => Ok(config),
            None => {
                debug!("No {} found, using defaults", Self::CONFIG_FILE);
                Ok(ReporterConfig::default())
            }
        }
    }

    /// Search order: current directory, its parents, then the user config directory
    pub fn find_and_load() -> Option<ReporterConfig> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        Self::try_load_from_user_dir()
    }

    fn try_load_from_current_dir() -> Option<ReporterConfig> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_logged(&config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<ReporterConfig> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("runreport")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_logged(&config_path)
        } else {
            None
        }
    }

    fn load_logged(path: &Path) -> Option<ReporterConfig> {
        match Self::load_from_path(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    fn expand_env(config: &mut ReporterConfig) {
        for value in config.runner.env.values_mut() {
            *value = resolve_env_vars(value);
        }
        for arg in config.runner.args.iter_mut() {
            *arg = resolve_env_vars(arg);
        }
    }
}

/// Replace `${VAR}` with the value of the environment variable, unset variables are kept as written
pub fn resolve_env_vars(text: &str) -> String {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

    re.replace_all(text, |caps: &Captures| {
        let env_name = &caps[1];
        std::env::var(env_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}
