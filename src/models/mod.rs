// Answer data model: what the user chose, before any planning happens

pub mod naming;
pub mod validation;

pub use naming::NamingVariants;
pub use validation::{
    validate_answer, validate_element_name, validate_property_name, validate_property_value,
    ValidationMode,
};

use crate::error::{ScaffoldError, ScaffoldResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default copyright owner offered when the user has no stored answer
pub const DEFAULT_COPYRIGHT_OWNER: &str = "Red Hat, Inc.";

/// Software license written to LICENSE.md
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum License {
    #[default]
    Apache2,
    Mit,
    Bsd3,
}

impl License {
    pub const ALL: [License; 3] = [License::Apache2, License::Mit, License::Bsd3];

    pub fn as_str(&self) -> &'static str {
        match self {
            License::Apache2 => "apache2",
            License::Mit => "mit",
            License::Bsd3 => "bsd3",
        }
    }

    /// Human label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            License::Apache2 => "Apache 2.0",
            License::Mit => "MIT",
            License::Bsd3 => "BSD 3 clause",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        License::ALL
            .into_iter()
            .find(|license| license.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = License::ALL.iter().map(|l| l.as_str()).collect();
                ScaffoldError::unknown_template("license", s, &expected)
            })
    }
}

/// Custom element base class. Each variant selects exactly one template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ElementBase {
    #[default]
    HTMLElement,
    RHElement,
    LitElement,
    PolymerElement,
}

impl ElementBase {
    pub const ALL: [ElementBase; 4] = [
        ElementBase::HTMLElement,
        ElementBase::RHElement,
        ElementBase::LitElement,
        ElementBase::PolymerElement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementBase::HTMLElement => "HTMLElement",
            ElementBase::RHElement => "RHElement",
            ElementBase::LitElement => "LitElement",
            ElementBase::PolymerElement => "PolymerElement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElementBase::HTMLElement => "VanillaJS, a pure HTMLElement developer invocation",
            ElementBase::RHElement => "RHElement, lightweight wrapper on Vanilla",
            ElementBase::LitElement => "LitElement, data binding and template wrapper work",
            ElementBase::PolymerElement => {
                "Polymer (3), data binding and lots of utilities to build complexity"
            }
        }
    }
}

impl fmt::Display for ElementBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementBase {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementBase::ALL
            .into_iter()
            .find(|base| base.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = ElementBase::ALL.iter().map(|b| b.as_str()).collect();
                ScaffoldError::unknown_template("customElementClass", s, &expected)
            })
    }
}

/// Data type of a custom element property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PropertyType {
    #[default]
    String,
    Boolean,
    Number,
    Object,
    Array,
    Date,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::String,
        PropertyType::Boolean,
        PropertyType::Number,
        PropertyType::Object,
        PropertyType::Array,
        PropertyType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "String",
            PropertyType::Boolean => "Boolean",
            PropertyType::Number => "Number",
            PropertyType::Object => "Object",
            PropertyType::Array => "Array",
            PropertyType::Date => "Date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::String => "String, text based input",
            PropertyType::Boolean => "Boolean, true/false value",
            PropertyType::Number => "Number, pure number like 54",
            PropertyType::Object => "Object, complex item storing multiple types",
            PropertyType::Array => "Array, list of types",
            PropertyType::Date => "Date, javascript date based object",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = PropertyType::ALL.iter().map(|t| t.as_str()).collect();
                ScaffoldError::unknown_template("property type", s, &expected)
            })
    }
}

/// Existing Sass dependency the element's stylesheet imports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SassLibrary {
    #[serde(alias = "pkg")]
    pub package_name: String,
    #[serde(alias = "path")]
    pub relative_path: String,
}

impl SassLibrary {
    /// The one library offered interactively
    pub fn rh_sass() -> Self {
        Self {
            package_name: "@rhelements/rh-sass".to_string(),
            relative_path: "rh-sass/rh-sass".to_string(),
        }
    }
}

/// One custom element property, also the entry shape of the properties manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: PropertyType,
    /// Default value; empty means "no default"
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub reflect_to_attribute: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer: Option<bool>,
}

/// The validated answer set for one scaffold run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub name: String,
    pub author: String,
    pub copyright_owner: String,
    pub license: License,
    pub use_sass: bool,
    pub sass_library: Option<SassLibrary>,
    pub custom_element_class: ElementBase,
    pub add_props: bool,
    pub props_list: Vec<PropertyDescriptor>,
}

/// Untyped property as read from an answers file or collected by prompts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub prop_type: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub reflect_to_attribute: bool,
    #[serde(default)]
    pub observer: Option<bool>,
}

/// Answers before the enumerated fields have been checked.
///
/// Missing optional fields take the same defaults the prompts offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswers {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub copyright_owner: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub use_sass: bool,
    #[serde(default)]
    pub sass_library: Option<SassLibrary>,
    #[serde(default)]
    pub custom_element_class: Option<String>,
    #[serde(default)]
    pub add_props: bool,
    #[serde(default)]
    pub props_list: Vec<RawProperty>,
}

impl TryFrom<RawProperty> for PropertyDescriptor {
    type Error = ScaffoldError;

    fn try_from(raw: RawProperty) -> ScaffoldResult<Self> {
        let prop_type = match raw.prop_type.as_deref() {
            Some(t) => t.parse()?,
            None => PropertyType::default(),
        };

        Ok(PropertyDescriptor {
            name: raw.name.trim().to_string(),
            prop_type,
            value: raw.value,
            reflect_to_attribute: raw.reflect_to_attribute,
            observer: raw.observer,
        })
    }
}

impl TryFrom<RawAnswers> for Answer {
    type Error = ScaffoldError;

    fn try_from(raw: RawAnswers) -> ScaffoldResult<Self> {
        let license = match raw.license.as_deref() {
            Some(l) => l.parse()?,
            None => License::default(),
        };
        let custom_element_class = match raw.custom_element_class.as_deref() {
            Some(c) => c.parse()?,
            None => ElementBase::default(),
        };
        let props_list = raw
            .props_list
            .into_iter()
            .map(PropertyDescriptor::try_from)
            .collect::<ScaffoldResult<Vec<_>>>()?;

        Ok(Answer {
            name: raw.name,
            author: raw.author,
            copyright_owner: raw
                .copyright_owner
                .unwrap_or_else(|| DEFAULT_COPYRIGHT_OWNER.to_string()),
            license,
            use_sass: raw.use_sass,
            sass_library: raw.sass_library,
            custom_element_class,
            add_props: raw.add_props,
            props_list,
        })
    }
}

impl Answer {
    /// Parse an answers document (JSON) into a typed answer set
    pub fn from_json(content: &str) -> ScaffoldResult<Self> {
        let raw: RawAnswers = serde_json::from_str(content)
            .map_err(|e| ScaffoldError::Config(format!("Failed to parse answers: {}", e)))?;
        Answer::try_from(raw)
    }
}
