//! Removal of previously generated summaries.
//!
//! Every `/// <summary> ... /// </summary>` block is inspected. A block is
//! treated as generated when its body carries the marker of the kind being
//! regenerated:
//!
//! - `ComponentTypeSet`: the body opens with `Components:`
//! - `EntityQuery`: the body mentions any clause name (`WithAll`, `WithNone`, ...)
//!   and does not open with `Components:`
//!
//! Hand-written summaries that carry neither marker are left untouched, as
//! are single-line `/// <summary>...</summary>` docs.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{ClauseKind, DeclarationKind};

/// Body prefix of a generated `ComponentTypeSet` summary.
pub const COMPONENTS_LABEL: &str = "Components:";

lazy_static! {
    /// A whole multi-line summary block, from the opening line through the
    /// closing line's terminator. The body is confined to consecutive `///` lines.
    static ref SUMMARY_BLOCK: Regex = Regex::new(
        r"(?m)^[ \t]*/// <summary>[ \t]*\r?\n((?:[ \t]*///.*\r?\n)*?)[ \t]*/// </summary>[ \t]*(?:\r?\n|\z)"
    ).unwrap();
}

/// Strip generated summaries of `kind`, removing their lines entirely.
///
/// The line that followed a removed block keeps its own indentation.
pub fn remove_stale_summaries(text: &str, kind: DeclarationKind) -> String {
    SUMMARY_BLOCK
        .replace_all(text, |caps: &Captures| {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if is_generated_summary(body, kind) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Check whether a summary body was produced for `kind`.
pub fn is_generated_summary(body: &str, kind: DeclarationKind) -> bool {
    let lists_components = opens_with_components(body);
    match kind {
        DeclarationKind::TypeSet => lists_components,
        DeclarationKind::Query => {
            !lists_components && ClauseKind::ALL.iter().any(|k| body.contains(k.as_str()))
        }
    }
}

fn opens_with_components(body: &str) -> bool {
    body.trim_start()
        .trim_start_matches('/')
        .trim_start()
        .starts_with(COMPONENTS_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_SET_SUMMARY: &str = "    /// <summary>\n    /// Components: <see cref=\"Position\" />\n    /// </summary>\n";
    const QUERY_SUMMARY: &str = "    /// <summary>\n    /// WithAll: <see cref=\"Position\" />\n    /// </summary>\n";

    #[test]
    fn test_removes_type_set_summary() {
        let text = format!("{{\n{}    private ComponentTypeSet _set;\n}}\n", TYPE_SET_SUMMARY);
        let result = remove_stale_summaries(&text, DeclarationKind::TypeSet);
        assert_eq!(result, "{\n    private ComponentTypeSet _set;\n}\n");
    }

    #[test]
    fn test_removes_query_summary() {
        let text = format!("{}    private EntityQuery _q;\n", QUERY_SUMMARY);
        let result = remove_stale_summaries(&text, DeclarationKind::Query);
        assert_eq!(result, "    private EntityQuery _q;\n");
    }

    #[test]
    fn test_kinds_do_not_strip_each_other() {
        let text = format!(
            "{}    private ComponentTypeSet _set;\n{}    private EntityQuery _q;\n",
            TYPE_SET_SUMMARY, QUERY_SUMMARY
        );
        let without_sets = remove_stale_summaries(&text, DeclarationKind::TypeSet);
        assert!(without_sets.contains("WithAll:"));
        assert!(!without_sets.contains("Components:"));

        let without_queries = remove_stale_summaries(&text, DeclarationKind::Query);
        assert!(without_queries.contains("Components:"));
        assert!(!without_queries.contains("WithAll:"));
    }

    #[test]
    fn test_keeps_hand_written_summary() {
        let text = "    /// <summary>\n    /// Cached query for movers.\n    /// </summary>\n    private EntityQuery _q;\n";
        assert_eq!(remove_stale_summaries(text, DeclarationKind::Query), text);
        assert_eq!(remove_stale_summaries(text, DeclarationKind::TypeSet), text);
    }

    #[test]
    fn test_removes_generated_block_after_hand_written_one() {
        let text = format!(
            "    /// <summary>\n    /// Cached.\n    /// </summary>\n{}    private EntityQuery _q;\n",
            QUERY_SUMMARY
        );
        let result = remove_stale_summaries(&text, DeclarationKind::Query);
        assert_eq!(
            result,
            "    /// <summary>\n    /// Cached.\n    /// </summary>\n    private EntityQuery _q;\n"
        );
    }

    #[test]
    fn test_crlf_and_end_of_text() {
        let text = "/// <summary>\r\n/// WithNone: <see cref=\"Dead\" />\r\n/// </summary>\r\nEntityQuery _q;";
        assert_eq!(remove_stale_summaries(text, DeclarationKind::Query), "EntityQuery _q;");

        let trailing = "x;\n/// <summary>\n/// Components: <see cref=\"A\" />\n/// </summary>";
        assert_eq!(remove_stale_summaries(trailing, DeclarationKind::TypeSet), "x;\n");
    }

    #[test]
    fn test_unclosed_summary_left_alone() {
        let text = "/// <summary>\n/// WithAll: <see cref=\"A\" />\nEntityQuery _q;\n";
        assert_eq!(remove_stale_summaries(text, DeclarationKind::Query), text);
    }

    #[test]
    fn test_single_line_summary_does_not_swallow_code() {
        let text = format!(
            "    /// <summary>Does work.</summary>\n    public void DoWork() {{ Counter++; }}\n\n{}    private EntityQuery _q;\n",
            QUERY_SUMMARY
        );
        let result = remove_stale_summaries(&text, DeclarationKind::Query);
        assert_eq!(
            result,
            "    /// <summary>Does work.</summary>\n    public void DoWork() { Counter++; }\n\n    private EntityQuery _q;\n"
        );
    }

    #[test]
    fn test_single_line_summary_before_type_set_block() {
        let text = format!(
            "    /// <summary>Cached lookup.</summary>\n    private int _lookup;\n\n{}    private ComponentTypeSet _set;\n",
            TYPE_SET_SUMMARY
        );
        let result = remove_stale_summaries(&text, DeclarationKind::TypeSet);
        assert_eq!(
            result,
            "    /// <summary>Cached lookup.</summary>\n    private int _lookup;\n\n    private ComponentTypeSet _set;\n"
        );
    }

    #[test]
    fn test_block_interrupted_by_code_is_not_a_summary() {
        let text = "/// <summary>\n/// Moves things.\nvoid Move() {}\n/// WithAll: <see cref=\"A\" />\n/// </summary>\nEntityQuery _q;\n";
        assert_eq!(remove_stale_summaries(text, DeclarationKind::Query), text);
    }

    #[test]
    fn test_is_generated_summary() {
        assert!(is_generated_summary("\n/// Components: <see cref=\"A\" />\n", DeclarationKind::TypeSet));
        assert!(!is_generated_summary("\n/// Components: <see cref=\"WithAllThing\" />\n", DeclarationKind::Query));
        assert!(is_generated_summary("\n/// Query 1: <br />\n/// WithAny: <see cref=\"A\" />\n", DeclarationKind::Query));
        assert!(!is_generated_summary("\n/// Plain text\n", DeclarationKind::Query));
    }
}
