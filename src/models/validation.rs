// Answer validation, run before anything is planned

use super::{Answer, PropertyType};
use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// How strictly names are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Full-string matches, duplicate property names rejected
    #[default]
    Strict,
    /// Substring matches, as earlier releases of the generator accepted
    Legacy,
}

fn strict_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z]+(-[a-z]+)+$").expect("static regex"))
}

fn legacy_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z]*)-([a-z]*)").expect("static regex"))
}

fn strict_property_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+$").expect("static regex"))
}

fn legacy_property_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w").expect("static regex"))
}

pub fn validate_element_name(name: &str, mode: ValidationMode) -> ScaffoldResult<()> {
    let ok = match mode {
        ValidationMode::Strict => strict_name_re().is_match(name),
        ValidationMode::Legacy => legacy_name_re().is_match(name),
    };
    if ok {
        Ok(())
    } else {
        Err(ScaffoldError::validation(
            "name",
            "name requires a hyphen and all lowercase",
        ))
    }
}

pub fn validate_property_name(name: &str, mode: ValidationMode) -> ScaffoldResult<()> {
    let ok = match mode {
        ValidationMode::Strict => strict_property_re().is_match(name.trim()),
        ValidationMode::Legacy => legacy_property_re().is_match(name),
    };
    if ok {
        Ok(())
    } else {
        Err(ScaffoldError::validation(
            "propsList.name",
            format!("'{}' is not a valid property name", name),
        ))
    }
}

/// Number and Boolean defaults are emitted as bare literals, so they must parse
pub fn validate_property_value(
    prop_type: PropertyType,
    value: &str,
    mode: ValidationMode,
) -> ScaffoldResult<()> {
    if mode != ValidationMode::Strict || value.is_empty() {
        return Ok(());
    }
    let ok = match prop_type {
        PropertyType::Number => value.parse::<f64>().map_or(false, f64::is_finite),
        PropertyType::Boolean => value == "true" || value == "false",
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(ScaffoldError::validation(
            "propsList.value",
            format!("'{}' is not a {} value", value, prop_type.as_str()),
        ))
    }
}

/// Check every field of an answer set that is not already constrained by its type
pub fn validate_answer(answer: &Answer, mode: ValidationMode) -> ScaffoldResult<()> {
    validate_element_name(&answer.name, mode)?;

    if !answer.add_props {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for prop in &answer.props_list {
        validate_property_name(&prop.name, mode)?;
        validate_property_value(prop.prop_type, &prop.value, mode)?;
        if mode == ValidationMode::Strict && prop.name.trim() != prop.name {
            return Err(ScaffoldError::validation(
                "propsList.name",
                format!("'{}' has surrounding whitespace", prop.name),
            ));
        }
        if mode == ValidationMode::Strict && !seen.insert(prop.name.trim()) {
            return Err(ScaffoldError::validation(
                "propsList.name",
                format!("duplicate property '{}'", prop.name.trim()),
            ));
        }
    }

    Ok(())
}
