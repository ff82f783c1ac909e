use anyhow::{Context, Result};
use dcc_export::ExportConfig;
use pfs_client::SessionConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable prefix; `PFS__SESSION__PASSWORD` maps to `session.password`.
pub const ENV_PREFIX: &str = "PFS__";

const DEFAULT_HOME_SUBDIR: &str = ".pfs";

/// Application configuration assembled from defaults, a YAML file and the
/// environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory for relative log paths. Empty means `$HOME/.pfs`.
    #[serde(default)]
    pub home_dir: String,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub export: ExportConfig,
    /// Uses [`default_logging_config`] when absent.
    pub logging: Option<LoggingConfig>,
}

/// Subsystem (crate target) → logging settings. Key `default` is the
/// catch-all and also names the log file.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub console_level: String, // "info", "debug", "off"
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "warn".to_string(),
            file: "logs/pfs.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(50),
        },
    );
    logging
}

impl AppConfig {
    /// Defaults → YAML file → `PFS__*` environment. `home_dir` comes back
    /// absolute and created.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Self::from_figment(Some(config_path.as_ref()))
    }

    /// Same layering without a file when `config_path` is `None`.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Self::from_figment(None),
        }
    }

    fn from_figment(config_path: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            if !path.is_file() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: AppConfig = figment
            .extract()
            .context("Failed to extract config from figment")?;

        config.home_dir = resolve_home_dir(&config.home_dir)
            .context("Failed to resolve home_dir")?
            .to_string_lossy()
            .to_string();
        Ok(config)
    }

    /// YAML rendering; the session password is never included.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let logging = self.logging.get_or_insert_with(default_logging_config);
        let default_section = logging.entry("default".to_string()).or_insert_with(|| Section {
            console_level: "warn".to_string(),
            file: String::new(),
            file_level: String::new(),
            max_backups: None,
            max_size_mb: None,
        });
        match args.verbose {
            0 => {}
            1 => default_section.console_level = "debug".to_string(),
            _ => default_section.console_level = "trace".to_string(),
        }
    }

    pub fn logging_or_default(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_else(default_logging_config)
    }
}

/// Command-line settings that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// `-v` count: 1 raises the console to debug, 2 or more to trace.
    pub verbose: u8,
}

/// Expand `~`, fall back to `$HOME/.pfs` for an empty value, make the path
/// absolute and create it.
fn resolve_home_dir(raw: &str) -> Result<PathBuf> {
    let raw = raw.trim();
    let home = || dirs::home_dir().context("no home directory for this user");

    let path = if raw.is_empty() {
        home()?.join(DEFAULT_HOME_SUBDIR)
    } else if raw == "~" {
        home()?
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home()?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    std::fs::create_dir_all(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    Ok(path)
}
