//! Rendering of extracted details into XML doc comment lines.

use super::stale::COMPONENTS_LABEL;
use super::{ClauseKind, Detail, QueryDetail, SummaryBlock, TypeSetDetail};

const LINE_BREAK: &str = "<br />";

fn cref(name: &str) -> String {
    format!("<see cref=\"{}\" />", name)
}

fn clause_items(kind: ClauseKind, items: &[String]) -> String {
    items
        .iter()
        .map(|item| match kind {
            ClauseKind::WithOptions => cref(&format!("EntityQueryOptions.{}", item)),
            _ => cref(item),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render one summary block per detail, ordered by descending source offset.
pub fn synthesize(details: &[Detail]) -> Vec<SummaryBlock> {
    let mut ordered: Vec<&Detail> = details.iter().collect();
    ordered.sort_by(|a, b| b.declaration().offset.cmp(&a.declaration().offset));
    ordered.into_iter().map(render).collect()
}

/// Render the summary block for a single detail.
pub fn render(detail: &Detail) -> SummaryBlock {
    let lines = match detail {
        Detail::TypeSet(d) => render_type_set(d),
        Detail::Query(d) => render_query(d),
    };
    SummaryBlock {
        target_offset: detail.declaration().offset,
        lines,
    }
}

fn render_type_set(detail: &TypeSetDetail) -> Vec<String> {
    let indent = &detail.declaration.indentation;
    let components = detail
        .components
        .iter()
        .map(|c| cref(c))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!("{}/// <summary>", indent),
        format!("{}/// {} {}", indent, COMPONENTS_LABEL, components),
        format!("{}/// </summary>", indent),
    ]
}

fn render_query(detail: &QueryDetail) -> Vec<String> {
    let indent = &detail.declaration.indentation;
    let labelled = detail.segments.len() > 1;
    let mut lines = vec![format!("{}/// <summary>", indent)];

    for (i, segment) in detail.segments.iter().enumerate() {
        if labelled {
            if i == 0 {
                lines.push(format!("{}/// Query {}: {}", indent, i + 1, LINE_BREAK));
            } else {
                lines.push(format!(
                    "{}/// {} Query {}: {}",
                    indent,
                    LINE_BREAK,
                    i + 1,
                    LINE_BREAK
                ));
            }
        }

        let clauses: Vec<_> = segment.populated().collect();
        for (j, (kind, items)) in clauses.iter().enumerate() {
            let mut line = format!("{}/// {}: {}", indent, kind, clause_items(*kind, items));
            // The next segment's label opens with its own break.
            if j + 1 < clauses.len() {
                line.push(' ');
                line.push_str(LINE_BREAK);
            }
            lines.push(line);
        }
    }

    lines.push(format!("{}/// </summary>", indent));
    lines
}
