//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory; a missing file
//! yields defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::world::animator::{DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_FPS, DEFAULT_MOVEMENT_SLOWNESS};
use crate::world::geo::{Coordinate, ScreenSize};
use crate::world::landmarks::MarkerStyle;

/// Default reveal radius in meters.
pub const DEFAULT_VISIBILITY_RADIUS: f64 = 100.0;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Graph server settings
    pub server: ServerSettings,
    /// Gameplay settings
    pub game: GameSettings,
    /// Map view settings
    pub viewport: ViewportSettings,
    /// Marker data files
    pub catalog: CatalogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            server: ServerSettings::default(),
            game: GameSettings::default(),
            viewport: ViewportSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

/// Graph server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server root, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Path of the JSON endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint: "/main".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Gameplay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Markers closer than this are revealed (meters)
    pub visibility_radius_m: f64,
    /// Animation slowness in milliseconds per meter; larger is slower
    pub movement_slowness: f64,
    /// Node stride between proximity checks while walking
    pub checkpoint_interval: usize,
    /// How close an endpoint must be to the goal to finish the round
    /// (meters); 0 requires exact coordinate equality
    pub arrival_tolerance_m: f64,
    /// Animation frame rate
    pub fps: u32,
    /// Replace the server's start node
    pub start_override: Option<Coordinate>,
    /// Replace the server's goal
    pub end_override: Option<Coordinate>,
    /// Goal used when the server sends none
    pub fallback_end: Option<Coordinate>,
    /// Quests active at the start of each game
    pub initial_quests: Vec<String>,
    /// Upper bound on moves for the autoplay walker
    pub max_moves: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            visibility_radius_m: DEFAULT_VISIBILITY_RADIUS,
            movement_slowness: DEFAULT_MOVEMENT_SLOWNESS,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            arrival_tolerance_m: 0.0,
            fps: DEFAULT_FPS,
            start_override: None,
            end_override: None,
            fallback_end: None,
            initial_quests: vec!["Go to the windmill".to_string()],
            max_moves: 200,
        }
    }
}

/// Map view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// View width in pixels
    pub width: f64,
    /// View height in pixels
    pub height: f64,
    /// Web Mercator zoom level
    pub zoom: f64,
    /// Inset of the off-screen indicator from the view edge (pixels)
    pub padding: f64,
}

impl ViewportSettings {
    pub fn size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            zoom: 18.0,
            padding: 30.0,
        }
    }
}

/// Layout of a marker CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Geocoded poem list
    Poem,
    /// Generic point-of-interest list
    Generic,
}

/// One marker data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSource {
    /// CSV path, relative to the data directory unless absolute
    pub path: PathBuf,
    /// Column layout
    pub kind: SourceKind,
    /// Icon stem for generic sources
    #[serde(default)]
    pub icon: Option<String>,
    /// Modal style for generic sources
    #[serde(default)]
    pub style: MarkerStyle,
}

/// Marker data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Field delimiter of every source file
    pub delimiter: char,
    /// Files loaded at game start, in order
    pub sources: Vec<MarkerSource>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            delimiter: ';',
            sources: vec![
                MarkerSource {
                    path: PathBuf::from("csv_files/poems_geocoded.csv"),
                    kind: SourceKind::Poem,
                    icon: None,
                    style: MarkerStyle::Box,
                },
                MarkerSource {
                    path: PathBuf::from("csv_files/restaurants.csv"),
                    kind: SourceKind::Generic,
                    icon: Some("food_marker_icon".to_string()),
                    style: MarkerStyle::Box,
                },
                MarkerSource {
                    path: PathBuf::from("csv_files/main_landmarks.csv"),
                    kind: SourceKind::Generic,
                    icon: Some("end_marker_icon".to_string()),
                    style: MarkerStyle::Full,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Resolve a source path against the data directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "poemwalk", "PoemWalk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from `path`; defaults when the file does not exist.
///
/// The data directory is set to the file's parent directory.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
