// Template resolution with cascading lookup
//
// Resolution order:
// 1. Custom directory (--templates-dir or [templates] dir in config)
// 2. Global (<config_dir>/rhelement-gen/templates/)
// 3. Builtin - embedded in the binary

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::builtin;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where a template body was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    Custom,
    Global,
    Builtin,
}

impl TemplateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSource::Custom => "custom",
            TemplateSource::Global => "global",
            TemplateSource::Builtin => "builtin",
        }
    }
}

/// A template body together with where it came from
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Template id, a `/` separated path relative to a template root
    pub id: String,
    /// Raw body, not yet rendered
    pub content: String,
    /// Layer of the cascade that supplied the body
    pub source: TemplateSource,
    /// Path on disk, None for builtin templates
    pub path: Option<PathBuf>,
}

/// Template resolver with caching
pub struct TemplateResolver {
    /// Highest priority overrides, from the CLI or config file
    custom_dir: Option<PathBuf>,
    /// Per-user overrides under the config directory
    global_dir: Option<PathBuf>,
    /// Resolved templates by id, kept for the life of the resolver
    cache: HashMap<String, ResolvedTemplate>,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver {
    /// Resolver with the user's global template directory, if the platform has one
    pub fn new() -> Self {
        Self {
            custom_dir: None,
            global_dir: global_templates_dir(),
            cache: HashMap::new(),
        }
    }

    pub fn with_custom_dir(mut self, dir: &Path) -> Self {
        self.custom_dir = Some(dir.to_path_buf());
        self
    }

    /// Override the global directory; None disables the global layer
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Resolve a template id, first match wins
    pub fn resolve(&mut self, id: &str) -> ScaffoldResult<ResolvedTemplate> {
        if let Some(cached) = self.cache.get(id) {
            debug!("Template '{}' resolved from cache ({})", id, cached.source.as_str());
            return Ok(cached.clone());
        }

        let resolved = match self.try_dir(self.custom_dir.as_deref(), id, TemplateSource::Custom)? {
            Some(t) => t,
            None => match self.try_dir(self.global_dir.as_deref(), id, TemplateSource::Global)? {
                Some(t) => t,
                None => match builtin::get_builtin_template(id) {
                    Some(content) => ResolvedTemplate {
                        id: id.to_string(),
                        content,
                        source: TemplateSource::Builtin,
                        path: None,
                    },
                    None => {
                        debug!("Template '{}' not found in any location", id);
                        return Err(ScaffoldError::TemplateRender {
                            action: id.to_string(),
                            missing_key: None,
                            reason: "template not found in any location".to_string(),
                        });
                    }
                },
            },
        };

        if resolved.source != TemplateSource::Builtin {
            info!(
                "Template '{}' resolved from {} directory: {:?}",
                id,
                resolved.source.as_str(),
                resolved.path
            );
        } else {
            debug!("Template '{}' resolved from builtin templates", id);
        }

        self.cache.insert(id.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// List every known template id with the source that would win for it.
    ///
    /// Override files that do not shadow a builtin are listed too; they are
    /// ignored by the planner but shown so typos are visible.
    pub fn list_all(&self) -> Vec<(String, TemplateSource)> {
        let mut templates = Vec::new();
        let mut seen = HashSet::new();

        for (dir, source) in [
            (self.custom_dir.as_deref(), TemplateSource::Custom),
            (self.global_dir.as_deref(), TemplateSource::Global),
        ] {
            let Some(dir) = dir else { continue };
            for id in scan_dir(dir) {
                if seen.insert(id.clone()) {
                    templates.push((id, source));
                }
            }
        }

        for id in builtin::list_builtin_templates() {
            if seen.insert(id.clone()) {
                templates.push((id, TemplateSource::Builtin));
            }
        }

        templates.sort_by(|a, b| a.0.cmp(&b.0));
        templates
    }

    fn try_dir(
        &self,
        dir: Option<&Path>,
        id: &str,
        source: TemplateSource,
    ) -> ScaffoldResult<Option<ResolvedTemplate>> {
        let Some(dir) = dir else { return Ok(None) };
        let path = dir.join(id);
        if !path.is_file() {
            return Ok(None);
        }

        debug!("Found {} template at {:?}", source.as_str(), path);
        let content = fs::read_to_string(&path).map_err(|e| ScaffoldError::TemplateRender {
            action: id.to_string(),
            missing_key: None,
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        Ok(Some(ResolvedTemplate {
            id: id.to_string(),
            content,
            source,
            path: Some(path),
        }))
    }
}

/// `<config_dir>/rhelement-gen/templates/`
pub fn global_templates_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rhelement-gen").join("templates"))
}

/// Template ids under a directory, using `/` separators like the builtin ids
fn scan_dir(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(dir).ok()?;
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver(custom: Option<&Path>, global: Option<&Path>) -> TemplateResolver {
        let mut resolver = TemplateResolver::new().with_global_dir(global.map(Path::to_path_buf));
        if let Some(custom) = custom {
            resolver = resolver.with_custom_dir(custom);
        }
        resolver
    }

    #[test]
    fn test_resolve_builtin() {
        let mut resolver = resolver(None, None);
        let template = resolver.resolve(builtin::PACKAGE_JSON).unwrap();

        assert_eq!(template.source, TemplateSource::Builtin);
        assert!(template.path.is_none());
        assert!(template.content.contains("elementName"));
    }

    #[test]
    fn test_custom_dir_wins_over_global() {
        let custom = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::create_dir_all(custom.path().join("src")).unwrap();
        fs::create_dir_all(global.path().join("src")).unwrap();
        fs::write(custom.path().join("src/element.css"), "/* custom */").unwrap();
        fs::write(global.path().join("src/element.css"), "/* global */").unwrap();

        let mut resolver = resolver(Some(custom.path()), Some(global.path()));
        let template = resolver.resolve(builtin::ELEMENT_CSS).unwrap();

        assert_eq!(template.source, TemplateSource::Custom);
        assert_eq!(template.content, "/* custom */");
    }

    #[test]
    fn test_global_wins_over_builtin() {
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("README.md"), "# {{ readmeName }}").unwrap();

        let mut resolver = resolver(None, Some(global.path()));
        let template = resolver.resolve(builtin::README).unwrap();

        assert_eq!(template.source, TemplateSource::Global);
        assert_eq!(template.content, "# {{ readmeName }}");
    }

    #[test]
    fn test_resolution_is_cached() {
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("README.md"), "first").unwrap();

        let mut cached = resolver(None, Some(global.path()));
        cached.resolve(builtin::README).unwrap();
        fs::write(global.path().join("README.md"), "second").unwrap();
        assert_eq!(cached.resolve(builtin::README).unwrap().content, "first");

        let mut fresh = resolver(None, Some(global.path()));
        assert_eq!(fresh.resolve(builtin::README).unwrap().content, "second");
    }

    #[test]
    fn test_missing_template_is_render_error() {
        let mut resolver = resolver(None, None);
        let err = resolver.resolve("src/ReactElement.js").unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateRender { ref action, .. } if action == "src/ReactElement.js"));
    }

    #[test]
    fn test_list_all_marks_overrides() {
        let custom = TempDir::new().unwrap();
        fs::create_dir_all(custom.path().join("licenses")).unwrap();
        fs::write(custom.path().join("licenses/mit.md"), "MIT").unwrap();

        let resolver = resolver(Some(custom.path()), None);
        let all = resolver.list_all();

        let mit = all.iter().find(|(id, _)| id == builtin::LICENSE_MIT).unwrap();
        assert_eq!(mit.1, TemplateSource::Custom);
        let apache = all.iter().find(|(id, _)| id == builtin::LICENSE_APACHE2).unwrap();
        assert_eq!(apache.1, TemplateSource::Builtin);
        assert_eq!(all.iter().filter(|(id, _)| id == builtin::LICENSE_MIT).count(), 1);
    }
}
