// Weather icon lookup: key -> image file -> decoded image

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, warn};

use crate::config::IconConfig;
use crate::error::AppError;
use crate::model::IconKey;

/// Directory icons are read from when nothing else is configured
pub const DEFAULT_ICON_DIR: &str = "images";

fn default_file(key: IconKey) -> &'static str {
    match key {
        IconKey::Sunny => "sun.png",
        IconKey::Cloudy => "cloudy.png",
        IconKey::Rain => "heavy-rain.png",
        IconKey::Thunderstorm => "storm.png",
        IconKey::Snow => "snow.png",
        IconKey::Fog => "fog.png",
        IconKey::PartlyCloudy => "cloudy.png",
    }
}

/// Mapping from icon key to image path
#[derive(Debug, Clone, PartialEq)]
pub struct IconTable {
    files: BTreeMap<IconKey, PathBuf>,
}

impl IconTable {
    pub fn with_defaults(dir: &Path) -> IconTable {
        let files = IconKey::ALL
            .iter()
            .map(|key| (*key, dir.join(default_file(*key))))
            .collect();
        IconTable { files }
    }

    /// Defaults under the configured (or given) directory, then per-key
    /// overrides. Relative override paths resolve against that directory.
    pub fn from_config(config: &IconConfig, fallback_dir: &Path) -> Result<IconTable, AppError> {
        let dir = config.dir.as_deref().unwrap_or(fallback_dir);
        let mut table = IconTable::with_defaults(dir);
        for (name, file) in &config.files {
            let key = name
                .parse::<IconKey>()
                .map_err(|_| AppError::Config(format!("unknown icon key in [icons.files]: {}", name)))?;
            table.insert(key, dir.join(file));
        }
        Ok(table)
    }

    pub fn empty() -> IconTable {
        IconTable {
            files: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: IconKey, path: PathBuf) {
        self.files.insert(key, path);
    }

    pub fn path(&self, key: IconKey) -> Option<&Path> {
        self.files.get(&key).map(PathBuf::as_path)
    }
}

/// Decoded icons, loaded once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    images: BTreeMap<IconKey, DynamicImage>,
}

impl IconSet {
    /// Decode every file in the table. Files that cannot be read or decoded
    /// are logged and left unresolved; they never fail the load.
    pub fn load(table: &IconTable) -> IconSet {
        let mut loaded: BTreeMap<PathBuf, DynamicImage> = BTreeMap::new();
        let mut images = BTreeMap::new();

        for key in IconKey::ALL {
            let Some(path) = table.path(key) else {
                debug!(icon = %key, "no image configured");
                continue;
            };
            if let Some(image) = loaded.get(path) {
                images.insert(key, image.clone());
                continue;
            }
            match image::open(path) {
                Ok(image) => {
                    debug!(icon = %key, path = %path.display(), "loaded icon");
                    loaded.insert(path.to_path_buf(), image.clone());
                    images.insert(key, image);
                }
                Err(e) => {
                    warn!(icon = %key, path = %path.display(), error = %e, "failed to load icon image");
                }
            }
        }

        IconSet { images }
    }

    pub fn insert(&mut self, key: IconKey, image: DynamicImage) {
        self.images.insert(key, image);
    }

    pub fn get(&self, key: IconKey) -> Option<&DynamicImage> {
        self.images.get(&key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
