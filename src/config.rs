use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::engine::Options;

pub const CONFIG_FILE_NAME: &str = ".propexrc.json";

/// Project configuration, read from `.propexrc.json` in the working
/// directory. Every field has a default; CLI flags override file values.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Replacement pattern, e.g. `Messages.getString(${key})`.
    #[serde(default)]
    pub code_pattern: Option<String>,
    #[serde(default = "default_accessor_name")]
    pub accessor_name: String,
    /// Bundle base name without the `.properties` extension.
    #[serde(default = "default_property_file_name", alias = "bundleName")]
    pub property_file_name: String,
    #[serde(default = "default_create_accessor")]
    pub create_accessor: bool,
    /// Import declaration added to rewritten sources, if any.
    #[serde(default)]
    pub added_import: Option<String>,
}

fn default_accessor_name() -> String {
    "Messages".to_string()
}

fn default_property_file_name() -> String {
    "messages".to_string()
}

fn default_create_accessor() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            code_pattern: None,
            accessor_name: default_accessor_name(),
            property_file_name: default_property_file_name(),
            create_accessor: default_create_accessor(),
            added_import: None,
        }
    }
}

impl Config {
    /// Loads the config from `dir`, falling back to defaults when the file
    /// does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Writes a default config file into `dir`; refuses to overwrite.
    pub fn write_default(dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        let content = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(&path, format!("{content}\n"))
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_options(&self) -> Options {
        Options {
            code_pattern: self.code_pattern.clone(),
            accessor_name: self.accessor_name.clone(),
            property_file_name: self.property_file_name.clone(),
            property_path: None,
            create_accessor: self.create_accessor,
            added_import: self.added_import.clone(),
        }
    }
}
