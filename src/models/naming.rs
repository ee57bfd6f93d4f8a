// Name variants derived from the element name

use crate::error::{ScaffoldError, ScaffoldResult};
use serde::{Deserialize, Serialize};

/// Every spelling of the element name the templates use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingVariants {
    pub element_name: String,
    pub element_class_name: String,
    pub lower_case_name: String,
    pub readme_name: String,
    pub camel_case_name: String,
}

impl NamingVariants {
    /// Derive the variants from a hyphenated element name.
    ///
    /// `lowerCaseName` is the segment at index 1 only, so `pfe-band-thing`
    /// yields `band`. Both the prefix and that segment must be non-empty.
    pub fn derive(name: &str) -> ScaffoldResult<Self> {
        let mut segments = name.split('-');
        let lower_case_name = match (segments.next(), segments.next()) {
            (Some(prefix), Some(second)) if !prefix.is_empty() && !second.is_empty() => {
                second.to_string()
            }
            _ => {
                return Err(ScaffoldError::validation(
                    "name",
                    format!("'{}' needs a prefix and a segment after the first hyphen", name),
                ))
            }
        };

        Ok(Self {
            element_name: name.to_string(),
            element_class_name: pascal_case(name),
            readme_name: upper_first(&lower_case_name),
            lower_case_name,
            camel_case_name: camel_case(name),
        })
    }
}

fn words(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `pfe-band` -> `PfeBand`
pub fn pascal_case(input: &str) -> String {
    words(input).map(capitalize).collect()
}

/// `pfe-band` -> `pfeBand`
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in words(input).enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Uppercase the first character, leave the rest untouched
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("pfe-band"), "PfeBand");
        assert_eq!(pascal_case("rh-cta-button"), "RhCtaButton");
        assert_eq!(pascal_case("PFE-CARD"), "PfeCard");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("pfe-band"), "pfeBand");
        assert_eq!(camel_case("rh-cta-button"), "rhCtaButton");
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("band"), "Band");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_lower_case_name_takes_second_segment_only() {
        let naming = NamingVariants::derive("pfe-band-thing").unwrap();
        assert_eq!(naming.lower_case_name, "band");
        assert_eq!(naming.readme_name, "Band");
        assert_eq!(naming.element_class_name, "PfeBandThing");
        assert_eq!(naming.camel_case_name, "pfeBandThing");
    }

    #[test]
    fn test_name_without_hyphen_is_rejected() {
        let err = NamingVariants::derive("pfecard").unwrap_err();
        assert!(matches!(err, ScaffoldError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_empty_prefix_or_second_segment_is_rejected() {
        for bad in ["-card", "pfe-", "pfe--card", "-"] {
            let err = NamingVariants::derive(bad).unwrap_err();
            assert!(
                matches!(err, ScaffoldError::Validation { ref field, .. } if field == "name"),
                "{} should be rejected",
                bad
            );
        }
        assert_eq!(NamingVariants::derive("Pfe-Card").unwrap().lower_case_name, "Card");
    }
}
