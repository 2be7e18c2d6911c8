use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use sevens_engine::tournament::DEFAULT_THRESHOLD;

pub const CONFIG_VAR: &str = "SEVENS_CONFIG";
pub const SEED_VAR: &str = "SEVENS_SEED";
pub const PLAYERS_VAR: &str = "SEVENS_PLAYERS";
pub const THRESHOLD_VAR: &str = "SEVENS_THRESHOLD";
pub const PLUGIN_DIR_VAR: &str = "SEVENS_PLUGIN_DIR";

/// Seats a game may have: at least two, and never more than there are cards.
pub const PLAYER_RANGE: std::ops::RangeInclusive<usize> = 2..=52;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub players: usize,
    pub threshold: usize,
    pub plugin_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub players: ValueSource,
    pub threshold: ValueSource,
    pub plugin_dir: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            players: ValueSource::Default,
            threshold: ValueSource::Default,
            plugin_dir: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            players: 4,
            threshold: DEFAULT_THRESHOLD,
            plugin_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Defaults, then the TOML file named by `SEVENS_CONFIG`, then the
/// `SEVENS_*` variables. Empty variables are ignored.
///
/// Values are parsed but not range-checked; each mode validates the values
/// it uses.
pub fn load_from(env: impl Fn(&str) -> Option<String>) -> Result<ConfigResolved, ConfigError> {
    let var = |key: &str| env(key).filter(|v| !v.is_empty());
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var(CONFIG_VAR) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.threshold {
            cfg.threshold = v;
            sources.threshold = ValueSource::File;
        }
        if let Some(v) = f.plugin_dir {
            cfg.plugin_dir = v;
            sources.plugin_dir = ValueSource::File;
        }
    }

    if let Some(seed) = var(SEED_VAR) {
        cfg.seed = Some(parse_number(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(players) = var(PLAYERS_VAR) {
        cfg.players = parse_number(&players, "players")?;
        sources.players = ValueSource::Env;
    }
    if let Some(threshold) = var(THRESHOLD_VAR) {
        cfg.threshold = parse_number(&threshold, "threshold")?;
        sources.threshold = ValueSource::Env;
    }
    if let Some(dir) = var(PLUGIN_DIR_VAR) {
        cfg.plugin_dir = PathBuf::from(dir);
        sources.plugin_dir = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    threshold: Option<usize>,
    #[serde(default)]
    plugin_dir: Option<PathBuf>,
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw)))
}

/// Checks every value, for commands that report the whole configuration.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_players(cfg.players)?;
    validate_threshold(cfg.threshold)
}

pub fn validate_players(players: usize) -> Result<(), ConfigError> {
    if !PLAYER_RANGE.contains(&players) {
        return Err(ConfigError::Invalid(format!(
            "players must be between {} and {}, got {}",
            PLAYER_RANGE.start(),
            PLAYER_RANGE.end(),
            players
        )));
    }
    Ok(())
}

pub fn validate_threshold(threshold: usize) -> Result<(), ConfigError> {
    if threshold == 0 {
        return Err(ConfigError::Invalid("threshold must be >0".into()));
    }
    Ok(())
}
