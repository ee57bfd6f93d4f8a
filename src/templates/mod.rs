// Template catalog, lookup and rendering

pub mod builtin;
pub mod engine;
pub mod resolver;

pub use engine::TemplateEngine;
pub use resolver::{ResolvedTemplate, TemplateResolver, TemplateSource};
