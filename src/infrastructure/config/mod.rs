use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::csv::FormatOverrides;
use crate::domain::error::Result;

pub const ENV_PREFIX: &str = "CSV_RESPONSE_";
const CSV_SECTION: &str = "csv";

/// Loads site-wide CSV option overrides from a TOML file and the environment
pub struct ConfigService {
    file: Option<PathBuf>,
}

impl ConfigService {
    /// Environment only
    pub fn new() -> Self {
        Self { file: None }
    }

    /// `[csv]` table of a TOML file, then the environment
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = &self.file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(
            Env::prefixed(ENV_PREFIX).map(|key| format!("{}.{}", CSV_SECTION, key.as_str()).into()),
        )
    }

    pub fn load_overrides(&self) -> Result<FormatOverrides> {
        let figment = self.figment();
        if !figment.contains(CSV_SECTION) {
            return Ok(FormatOverrides::default());
        }

        let overrides: FormatOverrides = figment.extract_inner(CSV_SECTION)?;
        debug!("Loaded CSV option overrides: {:?}", overrides);
        Ok(overrides)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
