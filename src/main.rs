use anyhow::{Context, Result};
use clap::Parser;
use rhelement_gen_lib::commands::{self, GenerateCommand, GenerateOutcome};
use rhelement_gen_lib::config::merger::{
    PartialPostScaffoldConfig, PartialTemplatesConfig, PartialValidationConfig,
};
use rhelement_gen_lib::config::{ConfigLoader, ConfigMerger, PartialConfig};
use rhelement_gen_lib::models::ValidationMode;
use rhelement_gen_lib::prompts::TerminalPrompter;
use std::path::PathBuf;

/// rhelement-gen - scaffold a new RHElement-style web component
#[derive(Parser, Debug)]
#[command(name = "rhelement-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read answers from a JSON file instead of prompting
    #[arg(long, value_name = "FILE")]
    answers: Option<PathBuf>,

    /// Directory the project folder is created in
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Directory whose files override the builtin templates
    #[arg(long, value_name = "DIR", env = "RHELEMENT_GEN_TEMPLATES")]
    templates_dir: Option<PathBuf>,

    /// Do not run the dependency install and build after writing files
    #[arg(long)]
    skip_install: bool,

    /// Print the file plan as JSON and write nothing
    #[arg(long)]
    dry_run: bool,

    /// Write into an existing, non-empty project directory
    #[arg(long)]
    force: bool,

    /// Accept names the way earlier releases did (unanchored checks)
    #[arg(long)]
    legacy_validation: bool,

    /// List template ids and where each resolves from, then exit
    #[arg(long)]
    list_templates: bool,
}

impl Cli {
    /// Only flags the user actually passed override the config files
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            templates: self.templates_dir.as_ref().map(|dir| PartialTemplatesConfig {
                dir: Some(dir.to_string_lossy().into_owned()),
            }),
            validation: self.legacy_validation.then(|| PartialValidationConfig {
                mode: Some(ValidationMode::Legacy),
            }),
            post_scaffold: self.skip_install.then(|| PartialPostScaffoldConfig {
                skip_install: Some(true),
                ..Default::default()
            }),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = ConfigLoader::new()
        .load_global()
        .context("Failed to load configuration")?;
    let config = ConfigMerger::new()
        .with_global(global)
        .with_cli(Some(cli.overrides()))
        .merge();

    let mut command = GenerateCommand::new(config);
    command.answers_file = cli.answers;
    command.output_dir = cli.output_dir;
    command.dry_run = cli.dry_run;
    command.force = cli.force;

    if cli.list_templates {
        let templates = commands::list_templates(&command.resolver());
        println!("{}", commands::format_template_list(&templates));
        return Ok(());
    }

    let mut prompter = TerminalPrompter::stdio();
    match command.run(&mut prompter)? {
        GenerateOutcome::DryRun(plan) => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        GenerateOutcome::Generated {
            report,
            post_scaffold,
        } => {
            for path in &report.written {
                println!("   create {}", path.display());
            }
            for step in &post_scaffold {
                println!("      ran {}", step.command);
            }
            println!(
                "\nDone. Your element is in {}",
                report.project_dir.display()
            );
        }
    }

    Ok(())
}
