use std::fs;
use std::io::ErrorKind;
use std::path::{ Path, PathBuf };

use serde::Deserialize;

use crate::errors::{ OktogenError, Result };
use crate::generators::CharacterClass;
use crate::password::{ DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH, PasswordRequest };

/// User defaults, read from `<config dir>/oktogen/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub length: usize,
    pub classes: Vec<CharacterClass>,
    pub exclude: String,
    pub copy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: CharacterClass::ALL.to_vec(),
            exclude: String::new(),
            copy: false,
        }
    }
}

impl Config {
    const FILE_NAME: &str = "config.json";

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(Self::FILE_NAME))
    }

    /// Loads `path`, or the default location when `None`.
    ///
    /// A missing file is not an error and gives the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                log::debug!("no config directory on this platform, using defaults");
                return Ok(Self::default());
            }
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(OktogenError::ConfigRead { path, source }),
        };

        let config: Config = serde_json::from_str(&contents)
            .map_err(|source| OktogenError::ConfigParse { path: path.clone(), source })?;

        log::info!("loaded config from {}", path.display());

        Ok(config)
    }

    pub fn request(&self) -> PasswordRequest {
        PasswordRequest {
            classes: self.classes.clone(),
            exclude: self.exclude.clone(),
            length: self.length.clamp(MIN_LENGTH, MAX_LENGTH),
        }
    }
}
