// Clippy allows for reasonable defaults
#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types
#![allow(clippy::derivable_impls)] // Explicit Default impls can be clearer
#![allow(clippy::field_reassign_with_default)] // Builder pattern is clearer
#![allow(clippy::unnecessary_map_or)] // map_or can be clearer than alternatives

// Module declarations
pub mod commands;
pub mod config;
pub mod error;
pub mod materializer;
pub mod models;
pub mod planner;
pub mod prompts;
pub mod runner;
pub mod templates;

pub use error::{ScaffoldError, ScaffoldResult};
pub use models::{Answer, ElementBase, License, PropertyDescriptor, PropertyType, SassLibrary};
pub use planner::{FileAction, PlanOptions, ScaffoldPlan, ScaffoldPlanner};
