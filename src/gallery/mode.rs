use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which content variant the gallery shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GalleryMode {
    SignInPromo,
    Loading,
    Error,
    Gallery,
}

impl GalleryMode {
    pub const ALL: [GalleryMode; 4] = [
        Self::SignInPromo,
        Self::Loading,
        Self::Error,
        Self::Gallery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignInPromo => "SIGN_IN_PROMO",
            Self::Loading => "LOADING",
            Self::Error => "ERROR",
            Self::Gallery => "GALLERY",
        }
    }
}

impl fmt::Display for GalleryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode tag that is not one of the four known values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gallery mode: {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for GalleryMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// One saved street as listed in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "creatorId")]
    pub creator_id: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StreetSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            creator_id: None,
            updated_at: None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "Unnamed St",
        }
    }
}

/// Snapshot of the gallery slice of shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: GalleryMode,
    pub user_id: Option<String>,
    pub streets: Vec<StreetSummary>,
    pub visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: GalleryMode::Loading,
            user_id: None,
            streets: Vec::new(),
            visible: false,
        }
    }
}

pub fn street_count_text(count: usize) -> String {
    match count {
        0 => "No streets yet".to_string(),
        1 => "1 street".to_string(),
        n => format!("{} streets", n),
    }
}
