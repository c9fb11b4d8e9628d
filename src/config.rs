// Optional TOML configuration: layout, theme and icon table overrides

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::layout::LayoutConfig;

/// Colours and type sizes used when drawing the sheet. Passed to the renderer
/// explicitly; there is no global style state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// RGB, 0-255
    pub box_fill: [u8; 3],
    pub border: [u8; 3],
    pub text: [u8; 3],
    pub border_thickness: f32,
    pub title_font_size: f32,
    pub text_font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            box_fill: [240, 240, 240],
            border: [0, 0, 0],
            text: [0, 0, 0],
            border_thickness: 0.5,
            title_font_size: 18.0,
            text_font_size: 12.0,
        }
    }
}

/// `[icons]` section: an image directory and per-key file overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub dir: Option<PathBuf>,
    pub files: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub theme: Theme,
    pub icons: IconConfig,
}

/// Load the configuration file. Every key is optional.
pub fn load_config(config_path: &Path) -> Result<Config, AppError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| AppError::Config(format!("{}: {}", config_path.display(), e)))?;
    parse_config(&toml)
}

pub fn parse_config(toml: &str) -> Result<Config, AppError> {
    let config: Config = toml::from_str(toml)?;
    Ok(config)
}
