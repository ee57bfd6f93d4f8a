// Answer -> file plan derivation. Pure: no I/O, no clock reads inside derive.

#[cfg(test)]
mod tests;

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::models::{
    Answer, ElementBase, License, NamingVariants, PropertyDescriptor, SassLibrary,
};
use crate::templates::builtin;
use chrono::Datelike;
use log::debug;
use serde::{Serialize, Serializer};

/// Inputs to planning that do not come from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub year: i32,
    pub generator_version: String,
}

impl PlanOptions {
    /// Current calendar year and this crate's version
    pub fn current() -> Self {
        Self {
            year: chrono::Local::now().year(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The variable set every templated action renders against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariables {
    pub year: i32,
    pub generator_version: String,

    pub name: String,
    pub author: String,
    pub copyright_owner: String,
    pub license: License,
    pub use_sass: bool,
    pub sass_library: Option<SassLibrary>,
    pub custom_element_class: ElementBase,
    pub add_props: bool,
    pub props_list: Vec<PropertyDescriptor>,

    #[serde(flatten)]
    pub naming: NamingVariants,

    /// Package name, or `false` when no library is used
    #[serde(serialize_with = "string_or_false")]
    pub sass_library_pkg: Option<String>,
    #[serde(serialize_with = "string_or_false")]
    pub sass_library_path: Option<String>,
    /// `propsList` as pretty JSON, two-space indent
    pub props_list_string: String,
}

fn string_or_false<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(s) => serializer.serialize_str(s),
        None => serializer.serialize_bool(false),
    }
}

/// One file to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAction {
    pub template_id: String,
    /// Relative to the project directory, `/` separated
    pub destination_relative_path: String,
    pub is_templated: bool,
    pub variables: TemplateVariables,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldPlan {
    /// Directory name of the new project, always the element name
    pub project_dir: String,
    pub naming: NamingVariants,
    pub actions: Vec<FileAction>,
}

pub fn license_template(license: License) -> &'static str {
    match license {
        License::Apache2 => builtin::LICENSE_APACHE2,
        License::Mit => builtin::LICENSE_MIT,
        License::Bsd3 => builtin::LICENSE_BSD3,
    }
}

pub fn base_template(base: ElementBase) -> &'static str {
    match base {
        ElementBase::HTMLElement => builtin::BASE_HTML_ELEMENT,
        ElementBase::RHElement => builtin::BASE_RH_ELEMENT,
        ElementBase::LitElement => builtin::BASE_LIT_ELEMENT,
        ElementBase::PolymerElement => builtin::BASE_POLYMER_ELEMENT,
    }
}

pub struct ScaffoldPlanner {
    options: PlanOptions,
}

impl ScaffoldPlanner {
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }

    /// Derive the ordered file plan for an answer set
    pub fn derive(&self, answer: &Answer) -> ScaffoldResult<ScaffoldPlan> {
        let naming = NamingVariants::derive(&answer.name)?;
        let variables = self.variables(answer, &naming)?;
        let name = &naming.element_name;

        let mut actions = Vec::new();
        let mut templated = |id: &str, dest: String| {
            actions.push(FileAction {
                template_id: id.to_string(),
                destination_relative_path: dest,
                is_templated: true,
                variables: variables.clone(),
            });
        };

        templated(builtin::PACKAGE_JSON, "package.json".to_string());
        templated(license_template(answer.license), "LICENSE.md".to_string());
        templated(
            base_template(answer.custom_element_class),
            format!("src/{}.js", name),
        );
        templated(
            builtin::PROPERTIES_JSON,
            format!("src/{}-properties.json", name),
        );
        templated(builtin::README, "README.md".to_string());
        templated(builtin::GULPFILE, "gulpfile.js".to_string());
        templated(builtin::DEMO_INDEX, "demo/index.html".to_string());
        templated(builtin::TEST_ELEMENT, format!("test/{}_test.html", name));
        templated(builtin::TEST_INDEX, "test/index.html".to_string());
        templated(builtin::STORY, format!("{}.story.js", name));

        let raw = |id: &str, dest: String| FileAction {
            template_id: id.to_string(),
            destination_relative_path: dest,
            is_templated: false,
            variables: variables.clone(),
        };

        for (id, dest) in builtin::DOTFILES {
            actions.push(raw(id, dest.to_string()));
        }

        if variables.use_sass {
            actions.push(FileAction {
                is_templated: true,
                ..raw(builtin::ELEMENT_SCSS, format!("src/{}.scss", name))
            });
        } else {
            actions.push(raw(builtin::ELEMENT_CSS, format!("src/{}.css", name)));
        }
        actions.push(raw(builtin::ELEMENT_HTML, format!("src/{}.html", name)));

        debug!("Planned {} actions for '{}'", actions.len(), name);

        Ok(ScaffoldPlan {
            project_dir: name.clone(),
            naming,
            actions,
        })
    }

    fn variables(
        &self,
        answer: &Answer,
        naming: &NamingVariants,
    ) -> ScaffoldResult<TemplateVariables> {
        let props_list = if answer.add_props {
            answer.props_list.clone()
        } else {
            Vec::new()
        };
        let sass_library = if answer.use_sass {
            answer.sass_library.clone()
        } else {
            None
        };

        let props_list_string =
            serde_json::to_string_pretty(&props_list).map_err(|e| ScaffoldError::TemplateRender {
                action: builtin::PROPERTIES_JSON.to_string(),
                missing_key: None,
                reason: e.to_string(),
            })?;

        Ok(TemplateVariables {
            year: self.options.year,
            generator_version: self.options.generator_version.clone(),
            name: answer.name.clone(),
            author: answer.author.clone(),
            copyright_owner: answer.copyright_owner.clone(),
            license: answer.license,
            use_sass: answer.use_sass,
            sass_library_pkg: sass_library.as_ref().map(|l| l.package_name.clone()),
            sass_library_path: sass_library.as_ref().map(|l| l.relative_path.clone()),
            sass_library,
            custom_element_class: answer.custom_element_class,
            add_props: answer.add_props,
            props_list,
            naming: naming.clone(),
            props_list_string,
        })
    }
}
