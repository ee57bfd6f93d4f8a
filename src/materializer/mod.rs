// Executes a scaffold plan into a directory tree

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::planner::ScaffoldPlan;
use crate::templates::{TemplateEngine, TemplateResolver};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// A file ready to be written, relative to the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Destination relative to the project directory, `/` separated
    pub relative_path: String,
    /// Final file body
    pub content: String,
}

/// What a successful materialization wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// `<output_dir>/<element name>`
    pub project_dir: PathBuf,
    /// Absolute paths, in plan order
    pub written: Vec<PathBuf>,
}

/// Renders a plan and writes it under an output directory
pub struct FileMaterializer {
    /// Source of template bodies for every action
    resolver: TemplateResolver,
    /// Write into a non-empty project directory instead of refusing
    force: bool,
}

impl FileMaterializer {
    pub fn new(resolver: TemplateResolver) -> Self {
        Self {
            resolver,
            force: false,
        }
    }

    /// Allow writing into an existing, non-empty project directory
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve and render every action without touching the filesystem
    pub fn render(&mut self, plan: &ScaffoldPlan) -> ScaffoldResult<Vec<RenderedFile>> {
        let mut engine = TemplateEngine::new();
        let mut files = Vec::with_capacity(plan.actions.len());

        for action in &plan.actions {
            let dest = &action.destination_relative_path;
            let template = self
                .resolver
                .resolve(&action.template_id)
                .map_err(|e| with_action(e, dest))?;

            let content = if action.is_templated {
                if !engine.has_template(&action.template_id) {
                    engine
                        .add_template(&action.template_id, &template.content)
                        .map_err(|e| with_action(e, dest))?;
                }
                engine
                    .render(&action.template_id, &action.variables)
                    .map_err(|e| with_action(e, dest))?
            } else {
                template.content
            };

            debug!("Rendered {} from {}", dest, action.template_id);
            files.push(RenderedFile {
                relative_path: dest.clone(),
                content,
            });
        }

        Ok(files)
    }

    /// Render the whole plan, then write it under `<output_root>/<project_dir>`.
    ///
    /// Nothing is written if any action fails to render.
    pub fn materialize(
        &mut self,
        plan: &ScaffoldPlan,
        output_root: &Path,
    ) -> ScaffoldResult<MaterializeReport> {
        let files = self.render(plan)?;
        let project_dir = output_root.join(&plan.project_dir);

        if !self.force && is_non_empty_dir(&project_dir)? {
            return Err(ScaffoldError::DestinationExists(project_dir));
        }

        info!(
            "Writing {} files into {}",
            files.len(),
            project_dir.display()
        );

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let path = join_relative(&project_dir, &file.relative_path);
            if let Err(source) = write_file(&path, &file.content) {
                return Err(ScaffoldError::Write {
                    path,
                    written,
                    source,
                });
            }
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(MaterializeReport {
            project_dir,
            written,
        })
    }
}

/// Replace the template id in a render error with the destination being produced
fn with_action(err: ScaffoldError, dest: &str) -> ScaffoldError {
    match err {
        ScaffoldError::TemplateRender {
            action,
            missing_key,
            reason,
        } => ScaffoldError::TemplateRender {
            action: format!("{} (template {})", dest, action),
            missing_key,
            reason,
        },
        other => other,
    }
}

fn is_non_empty_dir(path: &Path) -> ScaffoldResult<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if !path.is_dir() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_some())
}

fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
