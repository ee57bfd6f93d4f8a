// Error taxonomy for the scaffolding pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Bad user input. Interactive collection re-prompts on this.
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    /// A string could not be mapped onto one of the closed template choices
    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownTemplate {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Failed to render '{action}': {reason}")]
    TemplateRender {
        action: String,
        missing_key: Option<String>,
        reason: String,
    },

    #[error("Destination '{}' already exists and is not empty (use --force to write into it)", .0.display())]
    DestinationExists(PathBuf),

    #[error("Failed to write '{}' after {} file(s) were written: {source}", .path.display(), .written.len())]
    Write {
        path: PathBuf,
        written: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency install `{command}` failed ({}):\n{output}", exit_label(.code))]
    Install {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Build `{command}` failed ({}):\n{output}", exit_label(.code))]
    Build {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal or failed to start".to_string(),
    }
}

impl ScaffoldError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScaffoldError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_template(field: &str, value: &str, expected: &[&str]) -> Self {
        ScaffoldError::UnknownTemplate {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// Whether an interactive session can recover by asking again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScaffoldError::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ScaffoldError::validation("name", "name requires a hyphen");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'name': name requires a hyphen"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unknown_template_lists_choices() {
        let err = ScaffoldError::unknown_template("license", "gpl", &["apache2", "mit", "bsd3"]);
        assert_eq!(
            err.to_string(),
            "Unknown license 'gpl' (expected one of: apache2, mit, bsd3)"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_install_error_reports_exit_code() {
        let err = ScaffoldError::Install {
            command: "npm install".to_string(),
            code: Some(1),
            output: "ERR!".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("npm install"));
        assert!(message.contains("exit code 1"));
        assert!(message.contains("ERR!"));
    }
}
