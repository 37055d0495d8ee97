//! Point-of-interest markers: poems, restaurants, landmarks.

pub mod discovery;

pub use discovery::{DiscoveryProgress, MarkerCatalog};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::geo::Coordinate;

/// Marker icon kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Poem on a wall
    Poem,
    /// Restaurant or cafe
    Food,
    /// Main landmark / quest destination
    Landmark,
    /// Any other icon file name
    Custom(String),
}

impl MarkerIcon {
    /// Parse from the icon file stem used by the map assets.
    pub fn from_icon_name(name: &str) -> Self {
        match name {
            "poem_marker_icon" => Self::Poem,
            "food_marker_icon" => Self::Food,
            "end_marker_icon" => Self::Landmark,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Get icon file stem for this marker kind
    pub fn icon_name(&self) -> &str {
        match self {
            Self::Poem => "poem_marker_icon",
            Self::Food => "food_marker_icon",
            Self::Landmark => "end_marker_icon",
            Self::Custom(name) => name,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Poem => "Poem",
            Self::Food => "Restaurant",
            Self::Landmark => "Landmark",
            Self::Custom(name) => name,
        }
    }
}

/// How the detail modal is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Compact side box
    #[default]
    Box,
    /// Full-screen slideshow
    Full,
}

impl std::str::FromStr for MarkerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown marker style: {other}")),
        }
    }
}

/// Quest hooks carried by a marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestLink {
    /// Quest added when the marker is opened
    pub start: Option<String>,
    /// Quest completed when the marker is opened
    pub end: Option<String>,
    /// New navigation target once `end` is completed
    pub relocation: Option<Coordinate>,
}

impl QuestLink {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Descriptive metadata shown in the modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerMetadata {
    pub author: Option<String>,
    pub year: Option<String>,
    pub language: Option<String>,
    pub rating: Option<String>,
}

/// A point of interest on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Position; also the marker's identity within a catalog
    pub coords: Coordinate,
    /// Display title
    pub title: String,
    /// Body text
    #[serde(default)]
    pub text: String,
    /// Image paths, in slideshow order
    #[serde(default)]
    pub images: Vec<String>,
    /// Icon kind
    pub icon: MarkerIcon,
    /// Quest hooks
    #[serde(default)]
    pub quest: QuestLink,
    /// Author / year / language / rating
    #[serde(default)]
    pub metadata: MarkerMetadata,
    /// Optional 360° panorama file
    #[serde(default)]
    pub panorama: Option<String>,
    /// Modal layout
    #[serde(default)]
    pub style: MarkerStyle,
    /// Source columns with no dedicated field
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl MarkerRecord {
    /// Create a marker with no quest hooks or metadata.
    pub fn new(coords: Coordinate, title: impl Into<String>, icon: MarkerIcon) -> Self {
        Self {
            coords,
            title: title.into(),
            text: String::new(),
            images: Vec::new(),
            icon,
            quest: QuestLink::default(),
            metadata: MarkerMetadata::default(),
            panorama: None,
            style: MarkerStyle::Box,
            extra: BTreeMap::new(),
        }
    }

    /// Set modal style
    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    /// Add body text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Marker starts a quest when opened
    pub fn starts_quest(mut self, quest: impl Into<String>) -> Self {
        self.quest.start = Some(quest.into());
        self
    }

    /// Marker completes a quest when opened, optionally redirecting the goal
    pub fn ends_quest(mut self, quest: impl Into<String>, relocation: Option<Coordinate>) -> Self {
        self.quest.end = Some(quest.into());
        self.quest.relocation = relocation;
        self
    }
}
