//! INI file configuration adapter.
//!
//! Reads `[simulation]` and `[data]` overrides. Section and key names are
//! case-insensitive; values are trimmed by the parser.

use crate::domain::error::CrossoverError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    ini: Ini,
    source: String,
}

impl FileConfigAdapter {
    pub fn from_file(path: &Path) -> Result<Self, CrossoverError> {
        let source = path.display().to_string();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| CrossoverError::ConfigParse {
            file: source.clone(),
            reason,
        })?;
        Ok(Self { ini, source })
    }

    pub fn from_string(content: &str) -> Result<Self, CrossoverError> {
        let source = "<inline>".to_string();
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| CrossoverError::ConfigParse {
                file: source.clone(),
                reason,
            })?;
        Ok(Self { ini, source })
    }

    /// Where the settings came from, for log lines.
    pub fn source(&self) -> &str {
        &self.source
    }
}

fn invalid(section: &str, key: &str, expected: &str, detail: String) -> CrossoverError {
    CrossoverError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("expected {expected} ({detail})"),
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    fn get_count(&self, section: &str, key: &str) -> Result<Option<usize>, CrossoverError> {
        let Some(n) = self
            .ini
            .getuint(section, key)
            .map_err(|e| invalid(section, key, "a non-negative integer", e))?
        else {
            return Ok(None);
        };
        usize::try_from(n)
            .map(Some)
            .map_err(|e| invalid(section, key, "a non-negative integer", e.to_string()))
    }

    fn get_amount(&self, section: &str, key: &str) -> Result<Option<f64>, CrossoverError> {
        self.ini
            .getfloat(section, key)
            .map_err(|e| invalid(section, key, "a number", e))
    }
}
