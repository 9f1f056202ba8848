//! Summary runner that orchestrates the pipeline for one buffer.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SummarizeError;

use super::{
    extract_components, extract_query, find_declarations, remove_stale_summaries, splice,
    synthesize, Declaration, DeclarationKind, Detail, LineEnding, Outcome, QueryDetail,
    SkipReason, Skipped, TypeSetDetail,
};

/// Runs stale removal, discovery, extraction, rendering and splicing.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    line_ending: LineEnding,
}

impl Summarizer {
    /// Create a new summarizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line terminator used for inserted lines.
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Summarize all declarations of `kind` in `text`.
    pub fn run(&self, text: &str, kind: DeclarationKind) -> Result<Outcome, SummarizeError> {
        let stripped = remove_stale_summaries(text, kind);

        let found = find_declarations(&stripped, kind);
        if found.is_empty() {
            return Err(SummarizeError::NoDeclarationsFound {
                what: kind.type_token().to_string(),
            });
        }

        // Later declarations of the same name replace earlier ones.
        let mut by_name: HashMap<String, Declaration> = HashMap::new();
        for declaration in found {
            by_name.insert(declaration.name.clone(), declaration);
        }
        let mut declarations: Vec<Declaration> = by_name.into_values().collect();
        declarations.sort_by_key(|d| d.offset);

        let mut details = Vec::new();
        let mut skipped = Vec::new();
        let found = declarations.len();

        for declaration in declarations {
            match extract_detail(&stripped, declaration)? {
                Extracted::Detail(detail) => details.push(detail),
                Extracted::Skipped(skip) => {
                    debug!(
                        name = %skip.declaration.name,
                        line = skip.declaration.line,
                        reason = %skip.reason,
                        "skipping {}",
                        kind
                    );
                    skipped.push(skip);
                }
            }
        }

        let newline = self.line_ending.resolve(&stripped);
        let blocks = synthesize(&details);
        let result = splice(&stripped, &blocks, newline);

        let mut outcome = Outcome {
            changed: result != text,
            text: result,
            found,
            annotated: details.into_iter().map(|d| d.declaration().clone()).collect(),
            skipped,
        };
        relocate(&mut outcome);
        Ok(outcome)
    }

    /// Summarize each kind in turn, feeding every pass the previous pass's text.
    ///
    /// Fails with `NoDeclarationsFound` only when no kind finds anything.
    pub fn run_all(
        &self,
        text: &str,
        kinds: &[DeclarationKind],
    ) -> Result<Outcome, SummarizeError> {
        let mut outcome = Outcome {
            text: text.to_string(),
            ..Outcome::default()
        };
        let mut any_found = false;

        for &kind in kinds {
            match self.run(&outcome.text, kind) {
                Ok(pass) => {
                    any_found = true;
                    outcome.merge(pass);
                }
                Err(e) if e.is_notice() => debug!("no {} declarations", kind),
                Err(e) => return Err(e),
            }
        }

        if !any_found {
            let what = kinds
                .iter()
                .map(|k| k.type_token())
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(SummarizeError::NoDeclarationsFound { what });
        }

        // Later passes shift the lines reported by earlier ones.
        relocate(&mut outcome);
        Ok(outcome)
    }
}

/// Point every reported declaration at its position in `outcome.text`.
///
/// Duplicate names resolve to the last declaration, matching `run`.
fn relocate(outcome: &mut Outcome) {
    let mut positions: HashMap<(DeclarationKind, String), Declaration> = HashMap::new();
    for kind in DeclarationKind::ALL {
        for declaration in find_declarations(&outcome.text, kind) {
            positions.insert((kind, declaration.name.clone()), declaration);
        }
    }

    let reported = outcome
        .annotated
        .iter_mut()
        .chain(outcome.skipped.iter_mut().map(|s| &mut s.declaration));
    for declaration in reported {
        if let Some(found) = positions.get(&(declaration.kind, declaration.name.clone())) {
            *declaration = found.clone();
        }
    }
}

enum Extracted {
    Detail(Detail),
    Skipped(Skipped),
}

/// Extract the detail for one declaration, or the reason it is skipped.
fn extract_detail(text: &str, declaration: Declaration) -> Result<Extracted, regex::Error> {
    let extracted = match declaration.kind {
        DeclarationKind::TypeSet => {
            let components = extract_components(text, &declaration.name)?;
            if components.is_empty() {
                Extracted::Skipped(Skipped {
                    declaration,
                    reason: SkipReason::NoComponents,
                })
            } else {
                Extracted::Detail(Detail::TypeSet(TypeSetDetail {
                    declaration,
                    components,
                }))
            }
        }
        DeclarationKind::Query => match extract_query(text, &declaration.name)? {
            None => Extracted::Skipped(Skipped {
                declaration,
                reason: SkipReason::NoAssignment,
            }),
            Some(segments) if segments.iter().all(|s| s.is_empty()) => {
                Extracted::Skipped(Skipped {
                    declaration,
                    reason: SkipReason::EmptyQuery,
                })
            }
            Some(segments) => Extracted::Detail(Detail::Query(QueryDetail {
                declaration,
                segments,
            })),
        },
    };
    Ok(extracted)
}
