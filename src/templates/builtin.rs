// Built-in project templates, embedded at compile time

use rust_embed::Embed;
use std::borrow::Cow;

/// Template bodies from the crate's templates/ folder
#[derive(Embed)]
#[folder = "templates/"]
struct BuiltinTemplates;

/// Built-in template ids (paths relative to the templates/ folder)
pub const PACKAGE_JSON: &str = "package.json";
pub const README: &str = "README.md";
pub const GULPFILE: &str = "gulpfile.js";
pub const STORY: &str = "element.story.js";
pub const DEMO_INDEX: &str = "demo/index.html";
pub const TEST_ELEMENT: &str = "test/element_test.html";
pub const TEST_INDEX: &str = "test/index.html";
pub const PROPERTIES_JSON: &str = "src/properties.json";
pub const ELEMENT_SCSS: &str = "src/element.scss";
pub const ELEMENT_CSS: &str = "src/element.css";
pub const ELEMENT_HTML: &str = "src/element.html";

pub const LICENSE_APACHE2: &str = "licenses/apache2.md";
pub const LICENSE_MIT: &str = "licenses/mit.md";
pub const LICENSE_BSD3: &str = "licenses/bsd3.md";

pub const BASE_HTML_ELEMENT: &str = "src/HTMLElement.js";
pub const BASE_RH_ELEMENT: &str = "src/RHElement.js";
pub const BASE_LIT_ELEMENT: &str = "src/LitElement.js";
pub const BASE_POLYMER_ELEMENT: &str = "src/PolymerElement.js";

/// Dotfiles are stored without the leading dot: (template id, destination)
pub const DOTFILES: [(&str, &str); 4] = [
    ("dotfiles/babelrc", ".babelrc"),
    ("dotfiles/editorconfig", ".editorconfig"),
    ("dotfiles/gitignore", ".gitignore"),
    ("dotfiles/npmignore", ".npmignore"),
];

/// Get a built-in template body by id
pub fn get_builtin_template(id: &str) -> Option<String> {
    let file = BuiltinTemplates::get(id)?;
    match file.data {
        Cow::Borrowed(bytes) => String::from_utf8(bytes.to_vec()).ok(),
        Cow::Owned(bytes) => String::from_utf8(bytes).ok(),
    }
}

/// List all built-in template ids, sorted
pub fn list_builtin_templates() -> Vec<String> {
    let mut ids: Vec<String> = BuiltinTemplates::iter().map(|id| id.into_owned()).collect();
    ids.sort();
    ids
}
