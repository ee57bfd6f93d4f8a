// Question schema and answer collection
//
// Each question declares when it applies (a predicate over earlier answers)
// instead of branching in the collection loop.

pub mod terminal;

pub use terminal::TerminalPrompter;

use crate::config::StoredAnswers;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::models::{
    validate_element_name, validate_property_name, validate_property_value, ElementBase, License,
    PropertyType, RawAnswers, RawProperty, SassLibrary, ValidationMode, DEFAULT_COPYRIGHT_OWNER,
};
use log::debug;

/// Something that can ask the user questions
pub trait Prompter {
    /// Free text; a blank line yields `default` (or an empty string)
    fn input(&mut self, message: &str, default: Option<&str>) -> ScaffoldResult<String>;
    /// Index of the chosen entry
    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> ScaffoldResult<usize>;
    fn confirm(&mut self, message: &str, default: bool) -> ScaffoldResult<bool>;
    fn warn(&mut self, message: &str);
}

pub type Validator = fn(&str, ValidationMode) -> ScaffoldResult<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Clone)]
pub enum QuestionKind {
    Input {
        default: Option<&'static str>,
        validate: Option<Validator>,
    },
    Confirm {
        default: bool,
    },
    List {
        choices: Vec<Choice>,
        default: usize,
    },
    /// Asks `message` as yes/no, then the nested questions, until the user declines
    Repeat {
        prompts: Vec<Question>,
    },
}

#[derive(Clone)]
pub struct Question {
    pub key: &'static str,
    pub message: &'static str,
    pub kind: QuestionKind,
    /// Whether the answer is remembered as the next default
    pub store: bool,
    pub when: Option<fn(&RawAnswers) -> bool>,
}

impl Question {
    fn new(key: &'static str, message: &'static str, kind: QuestionKind) -> Self {
        Self {
            key,
            message,
            kind,
            store: false,
            when: None,
        }
    }

    fn stored(mut self) -> Self {
        self.store = true;
        self
    }

    fn when(mut self, predicate: fn(&RawAnswers) -> bool) -> Self {
        self.when = Some(predicate);
        self
    }

    pub fn applies(&self, answers: &RawAnswers) -> bool {
        self.when.map_or(true, |predicate| predicate(answers))
    }
}

const SASS_RH: &str = "rh-sass";
const SASS_NONE: &str = "none";

fn license_choices() -> Vec<Choice> {
    License::ALL
        .iter()
        .map(|l| Choice {
            value: l.as_str(),
            label: l.label(),
        })
        .collect()
}

fn base_choices() -> Vec<Choice> {
    ElementBase::ALL
        .iter()
        .map(|b| Choice {
            value: b.as_str(),
            label: b.label(),
        })
        .collect()
}

fn type_choices() -> Vec<Choice> {
    PropertyType::ALL
        .iter()
        .map(|t| Choice {
            value: t.as_str(),
            label: t.label(),
        })
        .collect()
}

fn property_prompts() -> Vec<Question> {
    vec![
        Question::new(
            "name",
            "Name of the property (examples: title, firstName, dataUrl)",
            QuestionKind::Input {
                default: None,
                validate: Some(validate_property_name),
            },
        ),
        Question::new(
            "type",
            "What 'type' of value is this (the way it is used as data)",
            QuestionKind::List {
                choices: type_choices(),
                default: 0,
            },
        ),
        Question::new(
            "value",
            "Default value (leave blank for none)",
            QuestionKind::Input {
                default: None,
                validate: None,
            },
        ),
        Question::new(
            "reflectToAttribute",
            "Make available in css styles? [name=\"stuff\"] { color: blue; }",
            QuestionKind::Confirm { default: false },
        ),
        Question::new(
            "observer",
            "Notice changes to this property?",
            QuestionKind::Confirm { default: true },
        ),
    ]
}

/// The generator's questions, in the order they are asked
pub fn schema() -> Vec<Question> {
    vec![
        Question::new(
            "name",
            "Element name",
            QuestionKind::Input {
                default: None,
                validate: Some(validate_element_name),
            },
        ),
        Question::new(
            "author",
            "Author of this element",
            QuestionKind::Input {
                default: None,
                validate: None,
            },
        )
        .stored(),
        Question::new(
            "copyrightOwner",
            "Copyright owner of this work",
            QuestionKind::Input {
                default: Some(DEFAULT_COPYRIGHT_OWNER),
                validate: None,
            },
        )
        .stored(),
        Question::new(
            "license",
            "Software License to use",
            QuestionKind::List {
                choices: license_choices(),
                default: 0,
            },
        )
        .stored(),
        Question::new(
            "useSass",
            "Do you want to use Sass in this element?",
            QuestionKind::Confirm { default: true },
        )
        .stored(),
        Question::new(
            "sassLibrary",
            "Do want to use existing Sass dependencies?",
            QuestionKind::List {
                choices: vec![
                    Choice {
                        value: SASS_RH,
                        label: "rh-sass",
                    },
                    Choice {
                        value: SASS_NONE,
                        label: "No thanks. I'll provide my own later",
                    },
                ],
                default: 0,
            },
        )
        .when(|answers| answers.use_sass),
        Question::new(
            "customElementClass",
            "Custom element base to build off of",
            QuestionKind::List {
                choices: base_choices(),
                default: 0,
            },
        )
        .stored(),
        Question::new(
            "addProps",
            "Do you want custom properties? (typically yes)",
            QuestionKind::Confirm { default: true },
        )
        .stored(),
        Question::new(
            "propsList",
            "Add a new property to this element?",
            QuestionKind::Repeat {
                prompts: property_prompts(),
            },
        )
        .when(|answers| answers.add_props),
    ]
}

/// A single collected value
#[derive(Debug, Clone, PartialEq)]
enum Answered {
    Text(String),
    Flag(bool),
    Props(Vec<RawProperty>),
}

/// Walk the schema, skipping questions whose predicate fails.
///
/// Validation failures are shown through the prompter and the question is
/// asked again; any other error ends collection.
pub fn collect(
    schema: &[Question],
    prompter: &mut dyn Prompter,
    defaults: &StoredAnswers,
    mode: ValidationMode,
) -> ScaffoldResult<RawAnswers> {
    let mut answers = RawAnswers::default();

    for question in schema {
        if !question.applies(&answers) {
            debug!("Skipping question '{}'", question.key);
            continue;
        }
        let stored = if question.store { Some(defaults) } else { None };
        let value = ask(question, prompter, stored, mode)?;
        apply(&mut answers, question.key, value)?;
    }

    Ok(answers)
}

fn ask(
    question: &Question,
    prompter: &mut dyn Prompter,
    stored: Option<&StoredAnswers>,
    mode: ValidationMode,
) -> ScaffoldResult<Answered> {
    match &question.kind {
        QuestionKind::Input { default, validate } => {
            let default = stored
                .and_then(|s| s.text(question.key))
                .or(*default);
            loop {
                let value = prompter.input(question.message, default)?;
                match validate.map_or(Ok(()), |check| check(&value, mode)) {
                    Ok(()) => return Ok(Answered::Text(value)),
                    Err(e) if e.is_recoverable() => prompter.warn(&validation_message(&e)),
                    Err(e) => return Err(e),
                }
            }
        }
        QuestionKind::Confirm { default } => {
            let default = stored
                .and_then(|s| s.flag(question.key))
                .unwrap_or(*default);
            Ok(Answered::Flag(prompter.confirm(question.message, default)?))
        }
        QuestionKind::List { choices, default } => {
            let default = stored
                .and_then(|s| s.text(question.key))
                .and_then(|v| choices.iter().position(|c| c.value == v))
                .unwrap_or(*default);
            let labels: Vec<&str> = choices.iter().map(|c| c.label).collect();
            let idx = prompter.select(question.message, &labels, default)?;
            let choice = choices
                .get(idx)
                .ok_or_else(|| ScaffoldError::validation(question.key, "choice out of range"))?;
            Ok(Answered::Text(choice.value.to_string()))
        }
        QuestionKind::Repeat { prompts } => {
            let mut props = Vec::new();
            while prompter.confirm(question.message, props.is_empty())? {
                let mut prop = RawProperty::default();
                for nested in prompts {
                    let value = loop {
                        let value = ask(nested, prompter, None, mode)?;
                        match property_problem(nested.key, &value, &prop, &props, mode) {
                            Some(problem) => prompter.warn(&problem),
                            None => break value,
                        }
                    };
                    apply_property(&mut prop, nested.key, value)?;
                }
                props.push(prop);
            }
            Ok(Answered::Props(props))
        }
    }
}

/// Checks that depend on earlier answers in the same property or session
fn property_problem(
    key: &str,
    value: &Answered,
    current: &RawProperty,
    collected: &[RawProperty],
    mode: ValidationMode,
) -> Option<String> {
    let Answered::Text(text) = value else {
        return None;
    };
    match key {
        "name" if mode == ValidationMode::Strict
            && collected.iter().any(|p| p.name.trim() == text.trim()) =>
        {
            Some(format!("duplicate property '{}'", text.trim()))
        }
        "value" => {
            let prop_type = current
                .prop_type
                .as_deref()
                .and_then(|t| t.parse::<PropertyType>().ok())
                .unwrap_or_default();
            validate_property_value(prop_type, text, mode)
                .err()
                .map(|e| validation_message(&e))
        }
        _ => None,
    }
}

fn validation_message(err: &ScaffoldError) -> String {
    match err {
        ScaffoldError::Validation { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn unexpected(key: &str) -> ScaffoldError {
    ScaffoldError::Config(format!("question '{}' produced an unexpected answer", key))
}

fn apply(answers: &mut RawAnswers, key: &str, value: Answered) -> ScaffoldResult<()> {
    match (key, value) {
        ("name", Answered::Text(v)) => answers.name = v,
        ("author", Answered::Text(v)) => answers.author = v,
        ("copyrightOwner", Answered::Text(v)) => answers.copyright_owner = Some(v),
        ("license", Answered::Text(v)) => answers.license = Some(v),
        ("useSass", Answered::Flag(v)) => answers.use_sass = v,
        ("sassLibrary", Answered::Text(v)) => {
            answers.sass_library = (v == SASS_RH).then(SassLibrary::rh_sass)
        }
        ("customElementClass", Answered::Text(v)) => answers.custom_element_class = Some(v),
        ("addProps", Answered::Flag(v)) => answers.add_props = v,
        ("propsList", Answered::Props(v)) => answers.props_list = v,
        (key, _) => return Err(unexpected(key)),
    }
    Ok(())
}

fn apply_property(prop: &mut RawProperty, key: &str, value: Answered) -> ScaffoldResult<()> {
    match (key, value) {
        ("name", Answered::Text(v)) => prop.name = v,
        ("type", Answered::Text(v)) => prop.prop_type = Some(v),
        ("value", Answered::Text(v)) => prop.value = v,
        ("reflectToAttribute", Answered::Flag(v)) => prop.reflect_to_attribute = v,
        ("observer", Answered::Flag(v)) => prop.observer = Some(v),
        (key, _) => return Err(unexpected(key)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, PropertyType};
    use std::io::Cursor;

    fn run(input: &str, defaults: &StoredAnswers) -> (ScaffoldResult<RawAnswers>, String) {
        let mut prompter = TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = collect(&schema(), &mut prompter, defaults, ValidationMode::Strict);
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_schema_order_and_stored_flags() {
        let schema = schema();
        let keys: Vec<&str> = schema.iter().map(|q| q.key).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "author",
                "copyrightOwner",
                "license",
                "useSass",
                "sassLibrary",
                "customElementClass",
                "addProps",
                "propsList",
            ]
        );

        let stored: Vec<&str> = schema.iter().filter(|q| q.store).map(|q| q.key).collect();
        assert_eq!(
            stored,
            vec!["author", "copyrightOwner", "license", "useSass", "customElementClass", "addProps"]
        );
    }

    #[test]
    fn test_conditional_questions() {
        let schema = schema();
        let sass = schema.iter().find(|q| q.key == "sassLibrary").unwrap();
        let props = schema.iter().find(|q| q.key == "propsList").unwrap();

        let mut answers = RawAnswers::default();
        assert!(!sass.applies(&answers));
        assert!(!props.applies(&answers));

        answers.use_sass = true;
        answers.add_props = true;
        assert!(sass.applies(&answers));
        assert!(props.applies(&answers));
    }

    #[test]
    fn test_collect_pfe_card_session() {
        // name, author, owner (default), license MIT, no sass,
        // HTMLElement (default), props yes, one property, stop
        let input = "pfe-card\nJane\n\n2\nn\n\ny\ny\nheading\n\n\n\n\nn\n";
        let (result, _) = run(input, &StoredAnswers::default());
        let answer = Answer::try_from(result.unwrap()).unwrap();

        assert_eq!(answer.name, "pfe-card");
        assert_eq!(answer.author, "Jane");
        assert_eq!(answer.copyright_owner, "Red Hat, Inc.");
        assert_eq!(answer.license, License::Mit);
        assert!(!answer.use_sass);
        assert_eq!(answer.sass_library, None);
        assert_eq!(answer.custom_element_class, ElementBase::HTMLElement);
        assert!(answer.add_props);
        assert_eq!(answer.props_list.len(), 1);

        let prop = &answer.props_list[0];
        assert_eq!(prop.name, "heading");
        assert_eq!(prop.prop_type, PropertyType::String);
        assert_eq!(prop.value, "");
        assert!(!prop.reflect_to_attribute);
        assert_eq!(prop.observer, Some(true));
    }

    #[test]
    fn test_invalid_name_is_asked_again() {
        // pfecard rejected, then pfe-card; sass yes with rh-sass, no props
        let input = "pfecard\npfe-card\nJane\n\n\ny\n1\n3\nn\n";
        let (result, output) = run(input, &StoredAnswers::default());
        let raw = result.unwrap();

        assert_eq!(raw.name, "pfe-card");
        assert!(raw.use_sass);
        assert_eq!(raw.sass_library, Some(SassLibrary::rh_sass()));
        assert_eq!(raw.custom_element_class.as_deref(), Some("LitElement"));
        assert!(raw.props_list.is_empty());
        assert!(output.contains("name requires a hyphen and all lowercase"));
    }

    #[test]
    fn test_duplicate_property_name_is_asked_again() {
        // two properties; the second repeats `heading` before settling on `title`
        let input = "pfe-card\nJane\n\n2\nn\n\ny\n\
                     y\nheading\n\n\n\n\n\
                     y\nheading\ntitle\n\n\n\n\n\
                     n\n";
        let (result, output) = run(input, &StoredAnswers::default());
        let raw = result.unwrap();

        let names: Vec<&str> = raw.props_list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["heading", "title"]);
        assert!(output.contains(">> duplicate property 'heading'"));

        let answer = Answer::try_from(raw).unwrap();
        assert!(crate::models::validate_answer(&answer, ValidationMode::Strict).is_ok());
    }

    #[test]
    fn test_number_default_must_parse() {
        // type 3 is Number; `lots` is rejected, `54` accepted
        let input = "pfe-card\nJane\n\n2\nn\n\ny\n\
                     y\ncount\n3\nlots\n54\n\n\n\
                     n\n";
        let (result, output) = run(input, &StoredAnswers::default());
        let raw = result.unwrap();

        assert_eq!(raw.props_list[0].prop_type.as_deref(), Some("Number"));
        assert_eq!(raw.props_list[0].value, "54");
        assert!(output.contains("'lots' is not a Number value"));
    }

    #[test]
    fn test_duplicate_property_name_allowed_in_legacy_mode() {
        let input = "pfe-card\nJane\n\n2\nn\n\ny\n\
                     y\nheading\n\n\n\n\n\
                     y\nheading\n\n\n\n\n\
                     n\n";
        let mut prompter = TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let raw = collect(
            &schema(),
            &mut prompter,
            &StoredAnswers::default(),
            ValidationMode::Legacy,
        )
        .unwrap();
        assert_eq!(raw.props_list.len(), 2);
    }

    #[test]
    fn test_stored_answers_become_defaults() {
        let defaults = StoredAnswers {
            author: Some("Stored Author".to_string()),
            copyright_owner: Some("ACME".to_string()),
            license: Some("bsd3".to_string()),
            use_sass: Some(false),
            custom_element_class: Some("PolymerElement".to_string()),
            add_props: Some(false),
        };
        // Only the name is typed; everything else accepts the default
        let input = "pfe-card\n\n\n\n\n\n\n";
        let (result, output) = run(input, &defaults);
        let answer = Answer::try_from(result.unwrap()).unwrap();

        assert_eq!(answer.author, "Stored Author");
        assert_eq!(answer.copyright_owner, "ACME");
        assert_eq!(answer.license, License::Bsd3);
        assert!(!answer.use_sass);
        assert_eq!(answer.custom_element_class, ElementBase::PolymerElement);
        assert!(!answer.add_props);
        assert!(output.contains("(Stored Author)"));
    }

    #[test]
    fn test_eof_mid_session_is_error() {
        let (result, _) = run("pfe-card\nJane\n", &StoredAnswers::default());
        assert!(matches!(result, Err(ScaffoldError::Io(_))));
    }
}
