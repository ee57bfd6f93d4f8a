// Plan derivation scenarios

use super::*;
use crate::models::{PropertyType, ValidationMode};

fn options() -> PlanOptions {
    PlanOptions {
        year: 2018,
        generator_version: "0.2.2".to_string(),
    }
}

fn heading() -> PropertyDescriptor {
    PropertyDescriptor {
        name: "heading".to_string(),
        prop_type: PropertyType::String,
        value: String::new(),
        reflect_to_attribute: false,
        observer: Some(true),
    }
}

fn pfe_card() -> Answer {
    Answer {
        name: "pfe-card".to_string(),
        author: "Jane Doe".to_string(),
        copyright_owner: "Red Hat, Inc.".to_string(),
        license: License::Mit,
        use_sass: false,
        sass_library: None,
        custom_element_class: ElementBase::HTMLElement,
        add_props: true,
        props_list: vec![heading()],
    }
}

fn find<'a>(plan: &'a ScaffoldPlan, dest: &str) -> Option<&'a FileAction> {
    plan.actions.iter().find(|a| a.destination_relative_path == dest)
}

#[test]
fn test_pfe_card_scenario() {
    let plan = ScaffoldPlanner::new(options()).derive(&pfe_card()).unwrap();

    assert_eq!(plan.project_dir, "pfe-card");

    let css = find(&plan, "src/pfe-card.css").expect("css action");
    assert_eq!(css.template_id, builtin::ELEMENT_CSS);
    assert!(!css.is_templated);
    assert!(find(&plan, "src/pfe-card.scss").is_none());

    let js = find(&plan, "src/pfe-card.js").expect("js action");
    assert_eq!(js.template_id, builtin::BASE_HTML_ELEMENT);
    assert!(js.is_templated);

    let manifest = find(&plan, "src/pfe-card-properties.json").expect("manifest action");
    let parsed: serde_json::Value =
        serde_json::from_str(&manifest.variables.props_list_string).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "heading");
    assert_eq!(entries[0]["observer"], true);
}

#[test]
fn test_action_order_is_fixed() {
    let plan = ScaffoldPlanner::new(options()).derive(&pfe_card()).unwrap();
    let destinations: Vec<&str> = plan
        .actions
        .iter()
        .map(|a| a.destination_relative_path.as_str())
        .collect();

    assert_eq!(
        destinations,
        vec![
            "package.json",
            "LICENSE.md",
            "src/pfe-card.js",
            "src/pfe-card-properties.json",
            "README.md",
            "gulpfile.js",
            "demo/index.html",
            "test/pfe-card_test.html",
            "test/index.html",
            "pfe-card.story.js",
            ".babelrc",
            ".editorconfig",
            ".gitignore",
            ".npmignore",
            "src/pfe-card.css",
            "src/pfe-card.html",
        ]
    );
}

#[test]
fn test_license_selects_template() {
    let mut answer = pfe_card();
    for license in License::ALL {
        answer.license = license;
        let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();
        let action = find(&plan, "LICENSE.md").unwrap();
        assert_eq!(action.template_id, license_template(license));
    }
}

#[test]
fn test_exactly_one_base_class_template() {
    let base_ids: Vec<&str> = ElementBase::ALL.iter().map(|b| base_template(*b)).collect();
    let mut answer = pfe_card();

    for base in ElementBase::ALL {
        answer.custom_element_class = base;
        let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();
        let bases: Vec<&FileAction> = plan
            .actions
            .iter()
            .filter(|a| base_ids.contains(&a.template_id.as_str()))
            .collect();

        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].template_id, base_template(base));
        assert_eq!(bases[0].destination_relative_path, "src/pfe-card.js");
    }
}

#[test]
fn test_scss_and_css_are_exclusive() {
    let mut answer = pfe_card();
    for use_sass in [true, false] {
        answer.use_sass = use_sass;
        let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();
        let scss = find(&plan, "src/pfe-card.scss");
        let css = find(&plan, "src/pfe-card.css");

        assert_eq!(scss.is_some(), use_sass);
        assert_eq!(css.is_some(), !use_sass);
        if let Some(scss) = scss {
            assert!(scss.is_templated);
            assert_eq!(scss.template_id, builtin::ELEMENT_SCSS);
        }
    }
}

#[test]
fn test_sass_variables_are_false_without_sass() {
    let mut answer = pfe_card();
    answer.sass_library = Some(SassLibrary::rh_sass());
    let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();

    for action in &plan.actions {
        let json = serde_json::to_value(&action.variables).unwrap();
        assert_eq!(json["sassLibraryPkg"], false);
        assert_eq!(json["sassLibraryPath"], false);
        assert!(json["sassLibrary"].is_null());
    }
}

#[test]
fn test_sass_variables_carry_library() {
    let mut answer = pfe_card();
    answer.use_sass = true;
    answer.sass_library = Some(SassLibrary::rh_sass());
    let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();

    let json = serde_json::to_value(&plan.actions[0].variables).unwrap();
    assert_eq!(json["sassLibraryPkg"], "@rhelements/rh-sass");
    assert_eq!(json["sassLibraryPath"], "rh-sass/rh-sass");
}

#[test]
fn test_sass_without_library_is_false() {
    let mut answer = pfe_card();
    answer.use_sass = true;
    let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();

    let json = serde_json::to_value(&plan.actions[0].variables).unwrap();
    assert_eq!(json["sassLibraryPkg"], false);
    assert!(find(&plan, "src/pfe-card.scss").is_some());
}

#[test]
fn test_add_props_off_yields_empty_manifest() {
    let mut answer = pfe_card();
    answer.add_props = false;
    let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();

    let variables = &plan.actions[0].variables;
    assert!(variables.props_list.is_empty());
    assert_eq!(variables.props_list_string, "[]");
}

#[test]
fn test_naming_variables_are_flattened() {
    let mut answer = pfe_card();
    answer.name = "pfe-band-thing".to_string();
    let plan = ScaffoldPlanner::new(options()).derive(&answer).unwrap();

    let json = serde_json::to_value(&plan.actions[0].variables).unwrap();
    assert_eq!(json["elementName"], "pfe-band-thing");
    assert_eq!(json["elementClassName"], "PfeBandThing");
    assert_eq!(json["lowerCaseName"], "band");
    assert_eq!(json["readmeName"], "Band");
    assert_eq!(json["camelCaseName"], "pfeBandThing");
    assert_eq!(json["year"], 2018);
    assert_eq!(json["generatorVersion"], "0.2.2");
    assert_eq!(json["license"], "mit");
    assert_eq!(json["customElementClass"], "HTMLElement");
}

#[test]
fn test_derive_is_deterministic() {
    let planner = ScaffoldPlanner::new(options());
    let first = planner.derive(&pfe_card()).unwrap();
    let second = planner.derive(&pfe_card()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_name_without_hyphen_never_plans() {
    let mut answer = pfe_card();
    answer.name = "pfecard".to_string();

    assert!(crate::models::validate_answer(&answer, ValidationMode::Strict).is_err());
    let err = ScaffoldPlanner::new(options()).derive(&answer).unwrap_err();
    assert!(matches!(err, ScaffoldError::Validation { ref field, .. } if field == "name"));
}
