// Command handlers behind the CLI

pub mod generate;

pub use generate::{GenerateCommand, GenerateOutcome};

use crate::templates::{TemplateResolver, TemplateSource};

/// Every template id with the location it resolves from
pub fn list_templates(resolver: &TemplateResolver) -> Vec<(String, TemplateSource)> {
    resolver.list_all()
}

/// One line per template, as printed by `--list-templates`
pub fn format_template_list(templates: &[(String, TemplateSource)]) -> String {
    let width = templates.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|(id, source)| format!("{:width$}  {}", id, source.as_str(), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
