// Generator configuration and stored prompt defaults

pub mod defaults;
pub mod loader;
pub mod merger;

pub use defaults::{DefaultsStore, StoredAnswers};
pub use loader::{ConfigLoader, GeneratorConfig};
pub use merger::{ConfigMerger, PartialConfig};
