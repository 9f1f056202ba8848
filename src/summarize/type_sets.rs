//! Component extraction for `ComponentTypeSet` declarations.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `ComponentType.ReadOnly<T>()`, `ComponentType.ReadWrite<T>()`, ...
    static ref COMPONENT_TYPE_CALL: Regex = Regex::new(r"ComponentType\.\w+<([^>]+)>").unwrap();
}

/// Constructor shapes accepted for `_name = new ComponentTypeSet(...)`, most specific first.
fn assignment_patterns(name: &str) -> Result<[Regex; 2], regex::Error> {
    let name = regex::escape(name);
    Ok([
        Regex::new(&format!(
            r"(?s)\b_{}\s*=\s*new\s+ComponentTypeSet\s*\(\s*new\s+FixedList\d+Bytes<ComponentType>\s*\{{(.*?)\}}\s*\)\s*;",
            name
        ))?,
        Regex::new(&format!(
            r"(?s)\b_{}\s*=\s*new\s+ComponentTypeSet\s*\((.*?)\);",
            name
        ))?,
    ])
}

/// Extract the component types listed by the first `ComponentTypeSet`
/// assignment to `_name`.
///
/// Returns an empty list when no assignment matches either constructor shape.
/// Later reassignments of the same field are not considered.
pub fn extract_components(text: &str, name: &str) -> Result<Vec<String>, regex::Error> {
    for pattern in assignment_patterns(name)? {
        if let Some(caps) = pattern.captures(text) {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            return Ok(extract_component_list(body));
        }
    }
    Ok(Vec::new())
}

fn extract_component_list(body: &str) -> Vec<String> {
    COMPONENT_TYPE_CALL
        .captures_iter(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
