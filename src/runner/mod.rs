// Post-scaffold steps: dependency install, then the initial build

use crate::error::{ScaffoldError, ScaffoldResult};
use log::{debug, info};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";
pub const DEFAULT_BUILD_SCRIPT: &str = "build";

/// Lines kept from each child stream for results and error reports
const TAIL_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Install,
    Build,
}

/// Outcome of one child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    /// Command line as shown to the user, e.g. `npm install`
    pub command: String,
    /// Tail of stdout followed by the tail of stderr; the full streams
    /// were echoed to the terminal while the step ran
    pub output: String,
}

/// Runs the package manager inside a freshly written project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostScaffoldRunner {
    /// Executable looked up on PATH (`npm` unless configured)
    package_manager: String,
    /// Script name passed to `<package_manager> run`
    build_script: String,
}

impl Default for PostScaffoldRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER, DEFAULT_BUILD_SCRIPT)
    }
}

impl PostScaffoldRunner {
    pub fn new(package_manager: impl Into<String>, build_script: impl Into<String>) -> Self {
        Self {
            package_manager: package_manager.into(),
            build_script: build_script.into(),
        }
    }

    /// Install dependencies, then build. Stops at the first failure and
    /// leaves the project directory as it is.
    pub fn run(&self, project_dir: &Path) -> ScaffoldResult<Vec<StepOutput>> {
        let install = self.install(project_dir)?;
        let build = self.build(project_dir)?;
        Ok(vec![install, build])
    }

    pub fn install(&self, project_dir: &Path) -> ScaffoldResult<StepOutput> {
        self.exec(Step::Install, &["install"], project_dir)
    }

    pub fn build(&self, project_dir: &Path) -> ScaffoldResult<StepOutput> {
        self.exec(Step::Build, &["run", &self.build_script], project_dir)
    }

    fn exec(&self, step: Step, args: &[&str], project_dir: &Path) -> ScaffoldResult<StepOutput> {
        let command = format!("{} {}", self.package_manager, args.join(" "));
        let program = self.resolve_program(step, &command)?;

        info!("Running `{}` in {}", command, project_dir.display());
        let mut child = Command::new(&program)
            .args(args)
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failure(step, &command, None, e.to_string()))?;

        let stdout = child.stdout.take().map(|out| relay(out, Stream::Stdout));
        let stderr = child.stderr.take().map(|err| relay(err, Stream::Stderr));
        let status = child
            .wait()
            .map_err(|e| failure(step, &command, None, e.to_string()))?;

        let mut lines = collected(stdout);
        lines.extend(collected(stderr));
        let text = lines.join("\n").trim_end().to_string();

        if !status.success() {
            return Err(failure(step, &command, status.code(), text));
        }

        debug!("`{}` finished:\n{}", command, text);
        Ok(StepOutput {
            command,
            output: text,
        })
    }

    fn resolve_program(&self, step: Step, command: &str) -> ScaffoldResult<PathBuf> {
        which::which(&self.package_manager).map_err(|e| {
            failure(
                step,
                command,
                None,
                format!("could not find '{}' on PATH: {}", self.package_manager, e),
            )
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Echo a child stream line by line, keeping the last `TAIL_LINES`
fn relay<R: Read + Send + 'static>(stream: R, target: Stream) -> JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut tail = VecDeque::with_capacity(TAIL_LINES);
        for line in BufReader::new(stream).lines().map_while(Result::ok) {
            match target {
                Stream::Stdout => println!("{}", line),
                Stream::Stderr => eprintln!("{}", line),
            }
            if tail.len() == TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line);
        }
        tail.into_iter().collect()
    })
}

fn collected(handle: Option<JoinHandle<Vec<String>>>) -> Vec<String> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn failure(step: Step, command: &str, code: Option<i32>, output: String) -> ScaffoldError {
    let command = command.to_string();
    match step {
        Step::Install => ScaffoldError::Install {
            command,
            code,
            output,
        },
        Step::Build => ScaffoldError::Build {
            command,
            code,
            output,
        },
    }
}
