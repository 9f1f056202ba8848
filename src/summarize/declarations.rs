//! Discovery of `ComponentTypeSet` and `EntityQuery` field declarations.

use lazy_static::lazy_static;
use regex::Regex;

use super::splice::line_start;
use super::{Declaration, DeclarationKind};

lazy_static! {
    static ref TYPE_SET_DECLARATION: Regex = Regex::new(
        r"\b(?:(?:private|protected|public|internal)\s+)?ComponentTypeSet\s+_(\w+)\s*;"
    ).unwrap();

    static ref QUERY_DECLARATION: Regex = Regex::new(
        r"\b(?:(?:private|protected|public|internal)\s+)?EntityQuery\s+_(\w+)\s*;"
    ).unwrap();
}

fn pattern_for(kind: DeclarationKind) -> &'static Regex {
    match kind {
        DeclarationKind::TypeSet => &TYPE_SET_DECLARATION,
        DeclarationKind::Query => &QUERY_DECLARATION,
    }
}

/// Find all declarations of `kind` in source order.
pub fn find_declarations(text: &str, kind: DeclarationKind) -> Vec<Declaration> {
    pattern_for(kind)
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_string();
            let offset = whole.start();

            let start = line_start(text, offset);
            let indentation: String = text[start..offset]
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
            let line = text[..offset].matches('\n').count() + 1;

            Some(Declaration {
                name,
                kind,
                raw_text: whole.as_str().to_string(),
                offset,
                line,
                indentation,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_type_set_declarations() {
        let text = "class S\n{\n    private ComponentTypeSet _fooSet;\n\tComponentTypeSet _barSet ;\n}\n";
        let found = find_declarations(text, DeclarationKind::TypeSet);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "fooSet");
        assert_eq!(found[0].raw_text, "private ComponentTypeSet _fooSet;");
        assert_eq!(found[0].offset, text.find("private").unwrap());
        assert_eq!(found[0].indentation, "    ");
        assert_eq!(found[0].line, 3);

        assert_eq!(found[1].name, "barSet");
        assert_eq!(found[1].indentation, "\t");
        assert_eq!(found[1].line, 4);
    }

    #[test]
    fn test_requires_underscore_prefix() {
        let text = "private EntityQuery query;\nprivate EntityQuery _query;";
        let found = find_declarations(text, DeclarationKind::Query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "query");
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_ignores_other_types() {
        let text = "private EntityQueryBuilder _builder;\nprivate MyComponentTypeSet _x;\nEntityQuery _q = default;";
        assert!(find_declarations(text, DeclarationKind::Query).is_empty());
        assert!(find_declarations(text, DeclarationKind::TypeSet).is_empty());
    }

    #[test]
    fn test_modifiers_between_visibility_and_type() {
        let text = "    private readonly EntityQuery _q;";
        let found = find_declarations(text, DeclarationKind::Query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_text, "EntityQuery _q;");
        assert_eq!(found[0].indentation, "    ");
    }

    #[test]
    fn test_match_stays_on_declaration_line() {
        // A trailing word on the previous line must not pull the match upwards.
        let text = "    // cached query\n    EntityQuery _q;";
        let found = find_declarations(text, DeclarationKind::Query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].indentation, "    ");
    }
}
