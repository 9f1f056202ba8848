//! Core types shared by the summary pipeline.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two kinds of field declarations that receive summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// `ComponentTypeSet _name;`
    #[serde(rename = "type_sets", alias = "type-sets")]
    TypeSet,
    /// `EntityQuery _name;`
    #[serde(rename = "queries")]
    Query,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 2] = [DeclarationKind::TypeSet, DeclarationKind::Query];

    /// The C# type token a declaration of this kind is written with.
    pub fn type_token(&self) -> &'static str {
        match self {
            DeclarationKind::TypeSet => "ComponentTypeSet",
            DeclarationKind::Query => "EntityQuery",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::TypeSet => "type_sets",
            DeclarationKind::Query => "queries",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "type_sets" | "type-sets" => Some(DeclarationKind::TypeSet),
            "queries" => Some(DeclarationKind::Query),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_token())
    }
}

/// Builder-chain clause kinds, declared in rendering order.
///
/// The derived `Ord` follows declaration order, so a `BTreeMap` keyed by
/// `ClauseKind` iterates in the order summaries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClauseKind {
    WithAll,
    WithAllChunkComponent,
    WithAllChunkComponentRW,
    WithAllRW,
    WithAny,
    WithAnyChunkComponent,
    WithAnyChunkComponentRW,
    WithAnyRW,
    WithAspect,
    WithDisabled,
    WithDisabledRW,
    WithNone,
    WithNoneChunkComponent,
    WithOptions,
    WithPresent,
    WithPresentChunkComponent,
    WithPresentChunkComponentRW,
    WithPresentRW,
}

static CLAUSE_METHODS: phf::Map<&'static str, ClauseKind> = phf_map! {
    "WithAll" => ClauseKind::WithAll,
    "WithAllChunkComponent" => ClauseKind::WithAllChunkComponent,
    "WithAllChunkComponentRW" => ClauseKind::WithAllChunkComponentRW,
    "WithAllRW" => ClauseKind::WithAllRW,
    "WithAny" => ClauseKind::WithAny,
    "WithAnyChunkComponent" => ClauseKind::WithAnyChunkComponent,
    "WithAnyChunkComponentRW" => ClauseKind::WithAnyChunkComponentRW,
    "WithAnyRW" => ClauseKind::WithAnyRW,
    "WithAspect" => ClauseKind::WithAspect,
    "WithDisabled" => ClauseKind::WithDisabled,
    "WithDisabledRW" => ClauseKind::WithDisabledRW,
    "WithNone" => ClauseKind::WithNone,
    "WithNoneChunkComponent" => ClauseKind::WithNoneChunkComponent,
    "WithOptions" => ClauseKind::WithOptions,
    "WithPresent" => ClauseKind::WithPresent,
    "WithPresentChunkComponent" => ClauseKind::WithPresentChunkComponent,
    "WithPresentChunkComponentRW" => ClauseKind::WithPresentChunkComponentRW,
    "WithPresentRW" => ClauseKind::WithPresentRW,
};

impl ClauseKind {
    pub const ALL: [ClauseKind; 18] = [
        ClauseKind::WithAll,
        ClauseKind::WithAllChunkComponent,
        ClauseKind::WithAllChunkComponentRW,
        ClauseKind::WithAllRW,
        ClauseKind::WithAny,
        ClauseKind::WithAnyChunkComponent,
        ClauseKind::WithAnyChunkComponentRW,
        ClauseKind::WithAnyRW,
        ClauseKind::WithAspect,
        ClauseKind::WithDisabled,
        ClauseKind::WithDisabledRW,
        ClauseKind::WithNone,
        ClauseKind::WithNoneChunkComponent,
        ClauseKind::WithOptions,
        ClauseKind::WithPresent,
        ClauseKind::WithPresentChunkComponent,
        ClauseKind::WithPresentChunkComponentRW,
        ClauseKind::WithPresentRW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::WithAll => "WithAll",
            ClauseKind::WithAllChunkComponent => "WithAllChunkComponent",
            ClauseKind::WithAllChunkComponentRW => "WithAllChunkComponentRW",
            ClauseKind::WithAllRW => "WithAllRW",
            ClauseKind::WithAny => "WithAny",
            ClauseKind::WithAnyChunkComponent => "WithAnyChunkComponent",
            ClauseKind::WithAnyChunkComponentRW => "WithAnyChunkComponentRW",
            ClauseKind::WithAnyRW => "WithAnyRW",
            ClauseKind::WithAspect => "WithAspect",
            ClauseKind::WithDisabled => "WithDisabled",
            ClauseKind::WithDisabledRW => "WithDisabledRW",
            ClauseKind::WithNone => "WithNone",
            ClauseKind::WithNoneChunkComponent => "WithNoneChunkComponent",
            ClauseKind::WithOptions => "WithOptions",
            ClauseKind::WithPresent => "WithPresent",
            ClauseKind::WithPresentChunkComponent => "WithPresentChunkComponent",
            ClauseKind::WithPresentChunkComponentRW => "WithPresentChunkComponentRW",
            ClauseKind::WithPresentRW => "WithPresentRW",
        }
    }

    /// Look up a clause kind by the builder method name (`"WithAllRW"`).
    pub fn from_method_name(name: &str) -> Option<Self> {
        CLAUSE_METHODS.get(name).copied()
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field declaration found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Variable name with the leading underscore removed
    pub name: String,
    pub kind: DeclarationKind,
    /// Exact text matched by the declaration pattern
    pub raw_text: String,
    /// Byte offset of the match start
    pub offset: usize,
    /// 1-based line of the match start
    pub line: usize,
    /// Leading whitespace of the declaration's line
    pub indentation: String,
}

/// Components listed by a `ComponentTypeSet` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSetDetail {
    pub declaration: Declaration,
    pub components: Vec<String>,
}

/// One alternative sub-query of an `EntityQuery` builder chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySegment {
    clauses: BTreeMap<ClauseKind, Vec<String>>,
}

impl QuerySegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to a clause, keeping source order within the clause.
    pub fn push(&mut self, kind: ClauseKind, item: impl Into<String>) {
        self.clauses.entry(kind).or_default().push(item.into());
    }

    pub fn items(&self, kind: ClauseKind) -> &[String] {
        self.clauses.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Populated clauses in rendering order.
    pub fn populated(&self) -> impl Iterator<Item = (ClauseKind, &[String])> {
        self.clauses
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(kind, items)| (*kind, items.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}

/// Clause groups of an `EntityQuery` builder chain, one per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDetail {
    pub declaration: Declaration,
    pub segments: Vec<QuerySegment>,
}

/// Extracted configuration for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    TypeSet(TypeSetDetail),
    Query(QueryDetail),
}

impl Detail {
    pub fn declaration(&self) -> &Declaration {
        match self {
            Detail::TypeSet(d) => &d.declaration,
            Detail::Query(d) => &d.declaration,
        }
    }
}

/// Rendered comment lines and the offset of the declaration they document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock {
    pub target_offset: usize,
    pub lines: Vec<String>,
}

/// Why a declaration was left without a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No configuring assignment statement was found
    NoAssignment,
    /// The constructor call listed no component types
    NoComponents,
    /// The builder chain has no recognised clauses
    EmptyQuery,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoAssignment => write!(f, "no assignment found"),
            SkipReason::NoComponents => write!(f, "no component types listed"),
            SkipReason::EmptyQuery => write!(f, "query has no clauses"),
        }
    }
}

/// A declaration that was found but not annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub declaration: Declaration,
    pub reason: SkipReason,
}

/// Result of summarizing one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The rewritten document text
    pub text: String,
    /// Whether `text` differs from the input
    pub changed: bool,
    /// Declarations found, after collapsing duplicate names
    pub found: usize,
    /// Declarations that received a summary, in source order; positions refer to `text`
    pub annotated: Vec<Declaration>,
    pub skipped: Vec<Skipped>,
}

impl Outcome {
    /// Fold the outcome of a later pass over `self.text` into this one.
    pub fn merge(&mut self, later: Outcome) {
        self.text = later.text;
        self.changed |= later.changed;
        self.found += later.found;
        self.annotated.extend(later.annotated);
        self.skipped.extend(later.skipped);
    }
}
