//! Prompt template rendering.
//!
//! Bedrock managed prompts use `{{name}}` placeholders; some older templates
//! use the single-brace `{name}` form. Both are supported via plain substring
//! replacement: no grammar, no escaping, no recursion. Substitution runs once
//! per variable in map iteration order, and names missing from the variable
//! mapping are deliberately left verbatim in the output.

use std::collections::BTreeMap;

/// Fill `template` with the given variables.
///
/// A replacement value containing placeholder-shaped text is only touched
/// again if a later variable in iteration order happens to match it; the
/// renderer never re-scans to a fixpoint.
pub fn render(template: &str, variables: &BTreeMap<String, String>) -> String {
    let mut filled = template.to_string();
    for (name, value) in variables {
        filled = filled.replace(&format!("{{{{{name}}}}}"), value);
        filled = filled.replace(&format!("{{{name}}}"), value);
    }
    filled
}
