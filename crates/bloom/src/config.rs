use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use fanout::layout::{DEFAULT_ARC_FRACTION, DEFAULT_DISTANCE, DEFAULT_DURATION, DEFAULT_ROTATION_OFFSET};
use fanout::{ArcLayout, Easing, Point};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use thiserror::Error;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub count: usize,
    pub button_size: f64,
    pub main_button_size: f64,
    pub distance: f64,
    pub arc_fraction: f64,
    pub rotation_offset: f64,
    pub duration: f64,
    #[serde_as(as = "DisplayFromStr")]
    pub easing: Easing,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            count: 6,
            button_size: 50.0,
            main_button_size: 64.0,
            distance: DEFAULT_DISTANCE,
            arc_fraction: DEFAULT_ARC_FRACTION,
            rotation_offset: DEFAULT_ROTATION_OFFSET,
            duration: DEFAULT_DURATION,
            easing: Easing::Cubic,
        }
    }
}

impl MenuConfig {
    pub fn layout(&self) -> ArcLayout {
        ArcLayout {
            distance: self.distance,
            arc_fraction: self.arc_fraction,
            rotation_offset: self.rotation_offset,
            duration: self.duration,
        }
    }

    /// Whether switching to `other` needs the sub-buttons rebuilt.
    pub fn needs_rebuild(&self, other: &MenuConfig) -> bool {
        self.count != other.count
            || self.button_size != other.button_size
            || self.main_button_size != other.main_button_size
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub overlay: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 360,
            overlay: false,
        }
    }
}

impl WindowConfig {
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub menu: MenuConfig,
    pub window: WindowConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "bloom").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// `BLOOM_MENU__COUNT=8` sets `menu.count`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("BLOOM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Loads the user config, writing the bundled default on first run.
/// Any failure falls back to the built-in defaults.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
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
        log::error!("Failed to watch config directory: {}", e);
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
