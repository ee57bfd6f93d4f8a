// Template rendering engine using Tera

use crate::error::{ScaffoldError, ScaffoldResult};
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::error::Error as _;
use std::sync::OnceLock;
use tera::{Context, Tera};

/// Renders project template bodies against plan variables.
///
/// Autoescaping is off: ids such as `demo/index.html` would otherwise
/// HTML-escape JavaScript and JSON output.
pub struct TemplateEngine {
    tera: Tera,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        Self { tera }
    }

    /// Register a template body under an id
    pub fn add_template(&mut self, id: &str, body: &str) -> ScaffoldResult<()> {
        self.tera
            .add_raw_template(id, body)
            .map_err(|e| render_error(id, &e))
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.tera.get_template_names().any(|name| name == id)
    }

    /// Render a registered template. Undefined variables are errors.
    pub fn render<T: Serialize>(&self, id: &str, variables: &T) -> ScaffoldResult<String> {
        let context = Context::from_serialize(variables).map_err(|e| render_error(id, &e))?;
        debug!("Rendering template '{}'", id);
        self.tera.render(id, &context).map_err(|e| render_error(id, &e))
    }
}

fn missing_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Variable `([^`]+)` not found").expect("static regex"))
}

/// Flatten Tera's error chain and pull out the undefined variable, if any
fn render_error(id: &str, err: &tera::Error) -> ScaffoldError {
    let mut messages = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }

    let missing_key = messages.iter().find_map(|message| {
        missing_key_re()
            .captures(message)
            .map(|caps| caps[1].to_string())
    });

    ScaffoldError::TemplateRender {
        action: id.to_string(),
        missing_key,
        reason: messages.join(": "),
    }
}
