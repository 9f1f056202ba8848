//! Clause extraction for `EntityQuery` builder chains.
//!
//! Recognised assignments:
//!
//! ```text
//! _name = SystemAPI.QueryBuilder().WithAll<A, B>().WithNone<C>().Build();
//! _name = new EntityQueryBuilder(Allocator.Temp).WithAny<D>().Build(ref state);
//! ```
//!
//! `.AddAdditionalQuery()` splits the chain into independent segments.

use lazy_static::lazy_static;
use regex::Regex;

use super::{ClauseKind, QuerySegment};

const OPTIONS_PREFIX: &str = "EntityQueryOptions.";

lazy_static! {
    static ref SEGMENT_SEPARATOR: Regex = Regex::new(r"\.AddAdditionalQuery\(\)\s*").unwrap();

    /// `.WithAll<A, B>` and friends; the method name is resolved against `ClauseKind`.
    static ref CLAUSE_CALL: Regex = Regex::new(r"\.(With\w+)<([^>]*)>").unwrap();

    static ref OPTIONS_CALL: Regex = Regex::new(r"\.WithOptions\(([^)]*)\)").unwrap();
}

fn assignment_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?s)\b_{}\s*=\s*(?:SystemAPI\.QueryBuilder\(\)|new\s+EntityQueryBuilder\s*\([^)]*\))\s*(.*?)\.Build\([^)]*\)\s*;",
        regex::escape(name)
    ))
}

/// Extract the clause segments of the first builder assignment to `_name`.
///
/// Returns `None` when no assignment statement matches.
pub fn extract_query(text: &str, name: &str) -> Result<Option<Vec<QuerySegment>>, regex::Error> {
    let pattern = assignment_pattern(name)?;
    let Some(caps) = pattern.captures(text) else {
        return Ok(None);
    };
    let body = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    Ok(Some(
        SEGMENT_SEPARATOR.split(body).map(extract_segment).collect(),
    ))
}

fn extract_segment(segment: &str) -> QuerySegment {
    let mut result = QuerySegment::new();

    for caps in CLAUSE_CALL.captures_iter(segment) {
        let Some(kind) = ClauseKind::from_method_name(&caps[1]) else {
            continue;
        };
        if kind == ClauseKind::WithOptions {
            continue;
        }
        for item in caps[2].split(',').map(str::trim).filter(|s| !s.is_empty()) {
            result.push(kind, item);
        }
    }

    for option in extract_options(segment) {
        result.push(ClauseKind::WithOptions, option);
    }

    result
}

/// Option names from `.WithOptions(EntityQueryOptions.A | EntityQueryOptions.B)`.
fn extract_options(segment: &str) -> Vec<String> {
    OPTIONS_CALL
        .captures_iter(segment)
        .flat_map(|caps| {
            caps[1]
                .split('|')
                .filter_map(|part| part.trim().strip_prefix(OPTIONS_PREFIX))
                .map(|option| option.trim().to_string())
                .filter(|option| !option.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}
