//! Theme selection model.
//!
//! # Responsibility
//! - Name the available visual themes; rendering them is the view's job.

use serde::{Deserialize, Serialize};

/// Available visual themes. Persisted as a raw name string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeName {
    #[default]
    Beige,
    Sage,
    Pink,
    Midnight,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Beige,
        ThemeName::Sage,
        ThemeName::Pink,
        ThemeName::Midnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beige => "Beige",
            Self::Sage => "Sage",
            Self::Pink => "Pink",
            Self::Midnight => "Midnight",
        }
    }

    /// Parses a stored theme name; `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Beige" => Some(Self::Beige),
            "Sage" => Some(Self::Sage),
            "Pink" => Some(Self::Pink),
            "Midnight" => Some(Self::Midnight),
            _ => None,
        }
    }
}
