//! ecs-summarizer - XML doc summaries for Unity ECS fields.
//!
//! Scans C# source text for `ComponentTypeSet` and `EntityQuery` fields,
//! reads the statements that configure them, and inserts a `/// <summary>`
//! block above each field listing its component types or query clauses.
//! Previously generated summaries are replaced, so running the tool twice
//! gives the same text as running it once.
//!
//! Everything is plain pattern matching over the buffer text; there is no
//! C# parser.
//!
//! # Architecture
//!
//! - `summarize`: the text pipeline (stale removal, discovery, extraction,
//!   rendering, splicing) and the `Summarizer` runner
//! - `host`: the editor boundary (`DocumentHost`) with memory, file and stdio hosts
//! - `commands`: summarize commands executed against a host
//! - `config`: YAML configuration schema
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line interface

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod report;
pub mod summarize;

pub use commands::Command;
pub use config::Config;
pub use error::SummarizeError;
pub use host::{DocumentHost, FileHost, MemoryHost, StdioHost};
pub use summarize::{ClauseKind, DeclarationKind, LineEnding, Outcome, Summarizer};
