// Configuration merging with priority

use crate::config::loader::{
    GeneratorConfig, PostScaffoldConfig, TemplatesConfig, ValidationConfig,
};
use crate::models::ValidationMode;
use serde::{Deserialize, Serialize};

/// Partial configuration for merging
/// Uses Option<T> for all fields to support partial overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartialConfig {
    #[serde(default)]
    pub templates: Option<PartialTemplatesConfig>,
    #[serde(default)]
    pub validation: Option<PartialValidationConfig>,
    #[serde(default)]
    pub post_scaffold: Option<PartialPostScaffoldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartialTemplatesConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartialValidationConfig {
    pub mode: Option<ValidationMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PartialPostScaffoldConfig {
    pub package_manager: Option<String>,
    pub build_script: Option<String>,
    pub skip_install: Option<bool>,
}

/// Configuration merger
/// Priority order: CLI -> Global -> Defaults
pub struct ConfigMerger {
    defaults: GeneratorConfig,
    global: Option<GeneratorConfig>,
    cli: Option<PartialConfig>,
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMerger {
    pub fn new() -> Self {
        Self {
            defaults: GeneratorConfig::default(),
            global: None,
            cli: None,
        }
    }

    pub fn with_global(mut self, config: Option<GeneratorConfig>) -> Self {
        self.global = config;
        self
    }

    pub fn with_cli(mut self, config: Option<PartialConfig>) -> Self {
        self.cli = config;
        self
    }

    pub fn merge(&self) -> GeneratorConfig {
        let mut result = self.defaults.clone();

        if let Some(ref global) = self.global {
            result = self.merge_full(&result, global);
        }

        if let Some(ref cli) = self.cli {
            result = self.merge_partial(&result, cli);
        }

        result
    }

    fn merge_full(&self, base: &GeneratorConfig, over: &GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            templates: TemplatesConfig {
                dir: over.templates.dir.clone().or_else(|| base.templates.dir.clone()),
            },
            validation: over.validation.clone(),
            post_scaffold: over.post_scaffold.clone(),
        }
    }

    fn merge_partial(&self, base: &GeneratorConfig, partial: &PartialConfig) -> GeneratorConfig {
        GeneratorConfig {
            templates: partial
                .templates
                .as_ref()
                .map(|p| TemplatesConfig {
                    dir: p.dir.clone().or_else(|| base.templates.dir.clone()),
                })
                .unwrap_or_else(|| base.templates.clone()),
            validation: partial
                .validation
                .as_ref()
                .map(|p| ValidationConfig {
                    mode: p.mode.unwrap_or(base.validation.mode),
                })
                .unwrap_or_else(|| base.validation.clone()),
            post_scaffold: partial
                .post_scaffold
                .as_ref()
                .map(|p| self.merge_partial_post_scaffold(&base.post_scaffold, p))
                .unwrap_or_else(|| base.post_scaffold.clone()),
        }
    }

    fn merge_partial_post_scaffold(
        &self,
        base: &PostScaffoldConfig,
        partial: &PartialPostScaffoldConfig,
    ) -> PostScaffoldConfig {
        PostScaffoldConfig {
            package_manager: partial
                .package_manager
                .clone()
                .unwrap_or_else(|| base.package_manager.clone()),
            build_script: partial
                .build_script
                .clone()
                .unwrap_or_else(|| base.build_script.clone()),
            skip_install: partial.skip_install.unwrap_or(base.skip_install),
        }
    }
}
