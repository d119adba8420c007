use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::CatalogError;

pub type Rgb = (u8, u8, u8);

const INK: Rgb = (10, 10, 20);
const PAPER: Rgb = (255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub dark: Rgb,
    pub light: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Day => ThemeColors {
                dark: INK,
                light: PAPER,
            },
            Theme::Night => ThemeColors {
                dark: PAPER,
                light: INK,
            },
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// Picks the theme from an explicit preference, falling back to the
    /// terminal background advertised in `COLORFGBG`.
    pub fn detect(preference: Option<&str>) -> Self {
        if let Some(theme) = preference.and_then(|p| p.parse().ok()) {
            return theme;
        }
        match std::env::var("COLORFGBG") {
            Ok(value) => Theme::from_colorfgbg(&value),
            Err(_) => Theme::Day,
        }
    }

    /// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); ANSI background
    /// colours 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: &str) -> Self {
        let background = value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok());
        debug!("COLORFGBG background: {:?}", background);
        match background {
            Some(0..=6) | Some(8) => Theme::Night,
            _ => Theme::Day,
        }
    }
}

impl FromStr for Theme {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            other => Err(CatalogError::InvalidArgument(format!(
                "unknown theme {:?}, expected day or night",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Day => write!(f, "day"),
            Theme::Night => write!(f, "night"),
        }
    }
}
