//! `{{variable}}` templating for request paths and header values.

use std::collections::HashMap;

/// Interpolate `{{key}}` placeholders using the provided variable map.
/// Placeholders without a matching variable are left untouched.
pub fn interpolate(input: &str, variables: &HashMap<String, String>) -> String {
    let mut result = input.to_string();
    for (key, value) in variables {
        result = result.replace(&format!("{{{{{key}}}}}"), value);
    }
    result
}

/// Names of the placeholders still present in `input`, in order of
/// appearance.
pub fn unresolved(input: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        names.push(after[..end].trim().to_string());
        rest = &after[end + 2..];
    }
    names
}
