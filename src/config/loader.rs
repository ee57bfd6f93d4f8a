// Configuration file loading

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::models::ValidationMode;
use crate::runner::{DEFAULT_BUILD_SCRIPT, DEFAULT_PACKAGE_MANAGER};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Generator configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub post_scaffold: PostScaffoldConfig,
}

/// Template override settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplatesConfig {
    /// Directory whose files shadow the builtin templates by id
    #[serde(default, alias = "templatesDir")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

/// Dependency install and build settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostScaffoldConfig {
    #[serde(alias = "packageManager", default = "default_package_manager")]
    pub package_manager: String,
    #[serde(alias = "buildScript", default = "default_build_script")]
    pub build_script: String,
    #[serde(alias = "skipInstall", default)]
    pub skip_install: bool,
}

fn default_package_manager() -> String { DEFAULT_PACKAGE_MANAGER.to_string() }
fn default_build_script() -> String { DEFAULT_BUILD_SCRIPT.to_string() }

impl Default for PostScaffoldConfig {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            build_script: default_build_script(),
            skip_install: false,
        }
    }
}

/// Config loader
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_path: Self::get_global_config_path(),
        }
    }

    /// Use an explicit global config file instead of the platform location
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    /// `<config_dir>/rhelement-gen/config.toml`
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rhelement-gen").join("config.toml"))
    }

    /// Load global config, None when there is no file
    pub fn load_global(&self) -> ScaffoldResult<Option<GeneratorConfig>> {
        match self.global_path {
            Some(ref path) => self.load_from_path(path),
            None => Ok(None),
        }
    }

    pub fn load_from_path(&self, path: &Path) -> ScaffoldResult<Option<GeneratorConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ScaffoldError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: GeneratorConfig = toml::from_str(&contents).map_err(|e| {
            ScaffoldError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        validate_config(&config)?;
        Ok(Some(config))
    }
}

pub fn validate_config(config: &GeneratorConfig) -> ScaffoldResult<()> {
    if config.post_scaffold.package_manager.trim().is_empty() {
        return Err(ScaffoldError::Config(
            "post_scaffold.package_manager cannot be empty".to_string(),
        ));
    }
    if config.post_scaffold.build_script.trim().is_empty() {
        return Err(ScaffoldError::Config(
            "post_scaffold.build_script cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_global_path(Some(dir.path().join("config.toml")));
        assert!(loader.load_global().unwrap().is_none());
    }

    #[test]
    fn test_no_global_path_is_none() {
        let loader = ConfigLoader::new().with_global_path(None);
        assert!(loader.load_global().unwrap().is_none());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[validation]
mode = "legacy"

[post_scaffold]
packageManager = "pnpm"
"#,
        )
        .unwrap();

        let config = ConfigLoader::new().load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.validation.mode, ValidationMode::Legacy);
        assert_eq!(config.post_scaffold.package_manager, "pnpm");
        assert_eq!(config.post_scaffold.build_script, "build");
        assert!(!config.post_scaffold.skip_install);
        assert!(config.templates.dir.is_none());
    }

    #[test]
    fn test_unparsable_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[validation\nmode = ").unwrap();

        let err = ConfigLoader::new().load_from_path(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(ref msg) if msg.contains("Failed to parse")));
    }

    #[test]
    fn test_empty_package_manager_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[post_scaffold]\npackage_manager = \"\"\n").unwrap();

        assert!(ConfigLoader::new().load_from_path(&path).is_err());
    }

    #[test]
    fn test_templates_dir_alias() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[templates]\ntemplatesDir = \"/tmp/overrides\"\n").unwrap();

        let config = ConfigLoader::new().load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.templates.dir.as_deref(), Some("/tmp/overrides"));
    }
}
