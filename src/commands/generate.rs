// The generate pipeline: answers -> plan -> files -> install/build

use crate::config::{DefaultsStore, GeneratorConfig, StoredAnswers};
use crate::materializer::{FileMaterializer, MaterializeReport};
use crate::models::{validate_answer, Answer};
use crate::planner::{PlanOptions, ScaffoldPlan, ScaffoldPlanner};
use crate::prompts::{self, Prompter};
use crate::runner::{PostScaffoldRunner, StepOutput};
use crate::templates::resolver::global_templates_dir;
use crate::templates::TemplateResolver;
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one generate run needs besides the prompter
pub struct GenerateCommand {
    pub config: GeneratorConfig,
    /// Non-interactive mode: read answers from this JSON file
    pub answers_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub force: bool,
    pub defaults: DefaultsStore,
    pub global_templates_dir: Option<PathBuf>,
    pub plan_options: PlanOptions,
}

#[derive(Debug)]
pub enum GenerateOutcome {
    /// Nothing was written
    DryRun(ScaffoldPlan),
    Generated {
        report: MaterializeReport,
        /// Empty when install/build was skipped
        post_scaffold: Vec<StepOutput>,
    },
}

impl GenerateCommand {
    /// Defaults for a run from the current directory
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            answers_file: None,
            output_dir: PathBuf::from("."),
            dry_run: false,
            force: false,
            defaults: DefaultsStore::new(),
            global_templates_dir: global_templates_dir(),
            plan_options: PlanOptions::current(),
        }
    }

    pub fn resolver(&self) -> TemplateResolver {
        let resolver = TemplateResolver::new().with_global_dir(self.global_templates_dir.clone());
        match self.config.templates.dir {
            Some(ref dir) => resolver.with_custom_dir(Path::new(dir)),
            None => resolver,
        }
    }

    pub fn run(&self, prompter: &mut dyn Prompter) -> Result<GenerateOutcome> {
        let answer = self.answers(prompter)?;

        let plan = ScaffoldPlanner::new(self.plan_options.clone())
            .derive(&answer)
            .context("Failed to plan project files")?;
        info!(
            "Planned {} files for <{}>",
            plan.actions.len(),
            plan.naming.element_name
        );

        if self.dry_run {
            return Ok(GenerateOutcome::DryRun(plan));
        }

        let report = FileMaterializer::new(self.resolver())
            .with_force(self.force)
            .materialize(&plan, &self.output_dir)
            .context("Failed to write project files")?;

        let post = &self.config.post_scaffold;
        let post_scaffold = if post.skip_install {
            info!("Skipping dependency install and build");
            Vec::new()
        } else {
            PostScaffoldRunner::new(&post.package_manager, &post.build_script)
                .run(&report.project_dir)
                .with_context(|| {
                    format!(
                        "Project was written to {} but post-scaffold steps failed",
                        report.project_dir.display()
                    )
                })?
        };

        Ok(GenerateOutcome::Generated {
            report,
            post_scaffold,
        })
    }

    fn answers(&self, prompter: &mut dyn Prompter) -> Result<Answer> {
        let mode = self.config.validation.mode;

        if let Some(ref path) = self.answers_file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read answers file {}", path.display()))?;
            let answer = Answer::from_json(&content)
                .with_context(|| format!("Invalid answers file {}", path.display()))?;
            validate_answer(&answer, mode)?;
            return Ok(answer);
        }

        let stored = self.defaults.load().context("Failed to load stored answers")?;
        let raw = prompts::collect(&prompts::schema(), prompter, &stored, mode)?;
        let answer = Answer::try_from(raw)?;
        validate_answer(&answer, mode)?;

        // Only answers that passed validation become next run's defaults
        match self.defaults.save(&StoredAnswers::from(&answer)) {
            Ok(()) => {
                if let Some(path) = self.defaults.path() {
                    info!("Stored answers for next time in {}", path.display());
                }
            }
            Err(e) => warn!("Could not store answers for next time: {}", e),
        }
        Ok(answer)
    }
}
