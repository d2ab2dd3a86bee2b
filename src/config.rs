use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;

/// CLI settings: defaults, then an optional TOML file, then `GRANT_*` variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Where `batch` writes `<stem>.json` files.
    pub output_dir: PathBuf,
    /// Worker threads for `batch`; 0 leaves the choice to rayon.
    pub threads: usize,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from("projects_json"),
            threads: 0,
            pretty: true,
        }
    }
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let settings = builder
            .add_source(Environment::with_prefix("GRANT"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
