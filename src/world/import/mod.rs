//! Marker catalog import from delimited text files.
//!
//! Rows with missing or non-finite coordinates are kept at the `(0, 0)`
//! sentinel position and reported as warnings instead of failing the load.

pub mod markers;

pub use markers::{parse_generic, parse_poems};

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::config::{AppConfig, MarkerSource, SourceKind};
use crate::world::geo::Coordinate;
use crate::world::landmarks::{MarkerIcon, MarkerRecord};

/// Position given to markers whose coordinates cannot be parsed.
pub const SENTINEL_COORDINATE: Coordinate = Coordinate::new(0.0, 0.0);

/// Errors that can occur during marker import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Warning during import (non-fatal issues)
#[derive(Debug, Clone, PartialEq)]
pub enum ImportWarning {
    /// Row kept at the sentinel position (1-based data row)
    InvalidCoordinates { row: usize },
    /// Row could not be read at all
    SkippedRow { row: usize, reason: String },
    /// Configured source file is missing
    MissingSource { path: PathBuf },
}

/// Result of a marker import
#[derive(Debug, Default)]
pub struct ImportResult {
    pub records: Vec<MarkerRecord>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportResult {
    /// Append another result
    pub fn merge(&mut self, other: ImportResult) {
        self.records.extend(other.records);
        self.warnings.extend(other.warnings);
    }
}

/// Parse a coordinate component; `None` unless finite.
pub fn parse_component(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a latitude/longitude pair, falling back to the sentinel.
///
/// The flag is `true` when the sentinel was used.
pub fn parse_coordinate(lat: Option<&str>, lng: Option<&str>) -> (Coordinate, bool) {
    match (parse_component(lat), parse_component(lng)) {
        (Some(lat), Some(lng)) => (Coordinate::new(lat, lng), false),
        (lat, lng) => (
            Coordinate::new(
                lat.unwrap_or(SENTINEL_COORDINATE.lat),
                lng.unwrap_or(SENTINEL_COORDINATE.lng),
            ),
            true,
        ),
    }
}

/// Load one configured source file.
pub fn load_source(path: &Path, source: &MarkerSource, delimiter: u8) -> Result<ImportResult, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path)?;
    let result = match source.kind {
        SourceKind::Poem => parse_poems(file, delimiter)?,
        SourceKind::Generic => {
            let icon = source
                .icon
                .as_deref()
                .map(MarkerIcon::from_icon_name)
                .unwrap_or(MarkerIcon::Landmark);
            parse_generic(file, delimiter, icon, source.style)?
        }
    };

    tracing::info!(
        "Loaded {} markers from {} ({} warnings)",
        result.records.len(),
        path.display(),
        result.warnings.len()
    );
    Ok(result)
}

/// Load every configured source, in order.
///
/// Missing files are reported as warnings; unreadable files abort.
pub fn load_catalog(config: &AppConfig) -> Result<ImportResult, ImportError> {
    let delimiter = u8::try_from(config.catalog.delimiter).unwrap_or(b';');
    let mut total = ImportResult::default();

    for source in &config.catalog.sources {
        let path = config.resolve(&source.path);
        match load_source(&path, source, delimiter) {
            Ok(result) => total.merge(result),
            Err(ImportError::FileNotFound(path)) => {
                tracing::warn!("Marker source {} not found, skipping", path.display());
                total.warnings.push(ImportWarning::MissingSource { path });
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("{} markers added", total.records.len());
    Ok(total)
}
