use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::currency::DEFAULT_SYMBOL;
use crate::errors::{LedgerError, LedgerResult};
use crate::utils::{app_data_dir, ensure_dir};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_EXPORT_PREFIX: &str = "sme_export";

/// User preferences for the shell and its exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub export_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_collector: Option<String>,
    pub high_contrast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.into(),
            export_prefix: DEFAULT_EXPORT_PREFIX.into(),
            export_dir: None,
            default_collector: None,
            high_contrast: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "currency_symbol",
        "export_prefix",
        "export_dir",
        "default_collector",
        "high_contrast",
    ];

    /// Applies a textual `key value` pair. `none` clears optional settings.
    pub fn set_value(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        let value = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = non_empty(key, value)?,
            "export_prefix" => self.export_prefix = non_empty(key, value)?,
            "export_dir" => self.export_dir = optional(value).map(PathBuf::from),
            "default_collector" => self.default_collector = optional(value),
            "high_contrast" => {
                self.high_contrast = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    other => {
                        return Err(LedgerError::Validation(format!(
                            "high_contrast expects on/off, got `{other}`"
                        )))
                    }
                }
            }
            other => {
                return Err(LedgerError::Validation(format!(
                    "unknown config key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Directory exports are written to, defaulting to the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn non_empty(key: &str, value: &str) -> LedgerResult<String> {
    if value.is_empty() {
        Err(LedgerError::Validation(format!("{key} cannot be empty")))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Loads and saves [`Config`] as pretty JSON under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> LedgerResult<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> LedgerResult<Self> {
        let config_root = base.join(CONFIG_DIR);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> LedgerResult<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_updates_known_keys() {
        let mut config = Config::default();
        config.set_value("currency_symbol", "GH₵").unwrap();
        config.set_value("default_collector", "Kofi Mensah").unwrap();
        config.set_value("high_contrast", "on").unwrap();
        assert_eq!(config.currency_symbol, "GH₵");
        assert_eq!(config.default_collector.as_deref(), Some("Kofi Mensah"));
        assert!(config.high_contrast);

        config.set_value("default_collector", "none").unwrap();
        assert!(config.default_collector.is_none());
    }

    #[test]
    fn set_value_rejects_unknown_key_and_blank_symbol() {
        let mut config = Config::default();
        assert!(config.set_value("theme", "dark").is_err());
        assert!(config.set_value("currency_symbol", "  ").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/x/config.json")),
            PathBuf::from("/x/config.json.tmp")
        );
    }
}
