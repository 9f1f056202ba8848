//! Summary generation for `ComponentTypeSet` and `EntityQuery` fields.

mod declarations;
mod queries;
mod render;
mod runner;
mod splice;
mod stale;
mod type_sets;
mod types;

pub use declarations::find_declarations;
pub use queries::extract_query;
pub use render::{render, synthesize};
pub use runner::Summarizer;
pub use splice::{splice, LineEnding};
pub use stale::{is_generated_summary, remove_stale_summaries, COMPONENTS_LABEL};
pub use type_sets::extract_components;
pub use types::{
    ClauseKind, Declaration, DeclarationKind, Detail, Outcome, QueryDetail, QuerySegment,
    SkipReason, Skipped, SummaryBlock, TypeSetDetail,
};
