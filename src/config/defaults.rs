// Stored answers, offered as prompt defaults on the next run

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::models::{Answer, ElementBase, License};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Last answers to the stored questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoredAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_sass: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_element_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_props: Option<bool>,
}

impl StoredAnswers {
    /// Text default for a question key
    pub fn text(&self, key: &str) -> Option<&str> {
        match key {
            "author" => self.author.as_deref(),
            "copyrightOwner" => self.copyright_owner.as_deref(),
            "license" => self.license.as_deref(),
            "customElementClass" => self.custom_element_class.as_deref(),
            _ => None,
        }
    }

    /// Yes/no default for a question key
    pub fn flag(&self, key: &str) -> Option<bool> {
        match key {
            "useSass" => self.use_sass,
            "addProps" => self.add_props,
            _ => None,
        }
    }

    /// Enumerated values must still name a known choice
    fn check(&self) -> ScaffoldResult<()> {
        if let Some(ref license) = self.license {
            license.parse::<License>()?;
        }
        if let Some(ref base) = self.custom_element_class {
            base.parse::<ElementBase>()?;
        }
        Ok(())
    }
}

impl From<&Answer> for StoredAnswers {
    fn from(answer: &Answer) -> Self {
        Self {
            author: Some(answer.author.clone()),
            copyright_owner: Some(answer.copyright_owner.clone()),
            license: Some(answer.license.as_str().to_string()),
            use_sass: Some(answer.use_sass),
            custom_element_class: Some(answer.custom_element_class.as_str().to_string()),
            add_props: Some(answer.add_props),
        }
    }
}

/// File-backed store for [`StoredAnswers`]
pub struct DefaultsStore {
    path: Option<PathBuf>,
}

impl Default for DefaultsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultsStore {
    /// Store at `<config_dir>/rhelement-gen/defaults.toml`
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("rhelement-gen").join("defaults.toml")),
        }
    }

    pub fn at(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Missing file means nothing stored yet
    pub fn load(&self) -> ScaffoldResult<StoredAnswers> {
        let Some(ref path) = self.path else {
            return Ok(StoredAnswers::default());
        };
        if !path.exists() {
            return Ok(StoredAnswers::default());
        }

        let contents = fs::read_to_string(path)?;
        let stored: StoredAnswers = toml::from_str(&contents).map_err(|e| {
            ScaffoldError::Config(format!(
                "Failed to parse defaults file '{}': {}",
                path.display(),
                e
            ))
        })?;
        stored.check()?;
        Ok(stored)
    }

    pub fn save(&self, stored: &StoredAnswers) -> ScaffoldResult<()> {
        let Some(ref path) = self.path else {
            log::warn!("No config directory available, answers not stored");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(stored)
            .map_err(|e| ScaffoldError::Config(format!("Failed to serialize defaults: {}", e)))?;
        fs::write(path, contents)?;

        log::debug!("Stored answers in {}", path.display());
        Ok(())
    }
}
