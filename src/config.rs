use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::read_to_string,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    codec::Resolver,
    error::Result,
    timezone::{TimeZoneDb, TIMEZONES},
    units::{UnitDb, UNITS},
};

/// Codec settings read from a TOML file.
///
/// ```toml
/// units_path = "units.txt"
///
/// [timezone_overrides]
/// Eastern = "US/Eastern"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Units table to load instead of the embedded one.
    pub units_path: Option<PathBuf>,
    /// Short timezone name to full IANA id.
    pub timezone_overrides: BTreeMap<String, String>,
}

impl CodecConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file. A missing file yields the default config.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("[CodecConfig::load] reading {:?}", path);
        if !path.exists() {
            tracing::debug!("[CodecConfig::load] {:?} not found, using defaults", path);
            return Ok(CodecConfig::default());
        }
        let mut config = CodecConfig::from_toml_str(&read_to_string(path)?)?;
        // Relative units paths are taken from the config file's directory.
        if let (Some(units_path), Some(parent)) = (config.units_path.as_mut(), path.parent()) {
            if units_path.is_relative() {
                *units_path = parent.join(&*units_path);
            }
        }
        Ok(config)
    }

    /// Build the lookup services this config describes.
    pub fn resolver(&self) -> Result<Resolver> {
        let units = match &self.units_path {
            Some(path) => Arc::new(UnitDb::load(path)?),
            None => UNITS.clone(),
        };
        let zones = if self.timezone_overrides.is_empty() {
            TIMEZONES.clone()
        } else {
            Arc::new(TimeZoneDb::clone(&TIMEZONES).with_overrides(&self.timezone_overrides)?)
        };
        Ok(Resolver::new(units, zones))
    }
}
