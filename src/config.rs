use crate::chart::{Breakdown, InteractionMode, Segment, ZoomLevel};
use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SizeConfig {
    pub big: u32,
    pub small: u32,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            big: 480,
            small: 240,
        }
    }
}

impl SizeConfig {
    pub fn pixels(&self, zoom: ZoomLevel) -> u32 {
        match zoom {
            ZoomLevel::Big => self.big,
            ZoomLevel::Small => self.small,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mode: InteractionMode,
    #[serde(default)]
    pub zoom: ZoomLevel,
    #[serde(default)]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub size: SizeConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Percentage for '{segment}' must be within [0, 1], got {value}")]
    PercentageOutOfRange { segment: Segment, value: f64 },
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "arcgauge", "arcgauge")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    load_from(config::File::from(config_path).required(false))
}

fn load_from<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("ARCGAUGE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    or_default(load_config())
}

fn or_default(loaded: Result<Config, ConfigError>) -> Config {
    match loaded {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    // every test that builds a config reads the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let _guard = ENV_LOCK.lock();
        load_from(config::File::from_str(toml, config::FileFormat::Toml))
    }

    fn parse_with_env(toml: &str, vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let _guard = ENV_LOCK.lock();
        // SAFETY: ENV_LOCK serializes all environment access in these tests
        unsafe {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
        }
        let result = load_from(config::File::from_str(toml, config::FileFormat::Toml));
        unsafe {
            for (key, _) in vars {
                std::env::remove_var(key);
            }
        }
        result
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed = parse("mode = \"zoom\"\n[size]\nbig = 600\nsmall = 200\n").unwrap();
        assert_eq!(parsed.mode, InteractionMode::ZoomToggle);
        assert_eq!(parsed.zoom, ZoomLevel::Big);
        assert_eq!(parsed.breakdown, Breakdown::default());
        assert_eq!(parsed.size.pixels(ZoomLevel::Small), 200);
    }

    #[test]
    fn test_out_of_range_breakdown_is_rejected() {
        let toml = "[breakdown]\ncomplete = 1.4\npartial = 0.1\nincomplete = 0.3\n";
        assert!(parse(toml).is_err());
    }

    #[test]
    fn test_range_error_message_names_segment() {
        let err = Breakdown::new(0.6, -0.2, 0.3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Percentage for 'partial' must be within [0, 1], got -0.2"
        );
    }

    #[test]
    fn test_environment_overrides() {
        let parsed = parse_with_env(
            "",
            &[
                ("ARCGAUGE_MODE", "zoom"),
                ("ARCGAUGE_BREAKDOWN__PARTIAL", "0.2"),
            ],
        )
        .unwrap();
        assert_eq!(parsed.mode, InteractionMode::ZoomToggle);
        assert_eq!(parsed.breakdown.get(Segment::Partial), 0.2);
        assert_eq!(parsed.breakdown.get(Segment::Complete), 0.6);
    }

    #[test]
    fn test_environment_override_is_validated() {
        let result = parse_with_env("", &[("ARCGAUGE_BREAKDOWN__COMPLETE", "1.7")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let loaded = parse("[breakdown]\ncomplete = -1.0\n");
        assert!(loaded.is_err());
        assert_eq!(or_default(loaded), Config::default());
    }
}
