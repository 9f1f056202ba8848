//! Summarize commands executed against a document host.

use crate::error::SummarizeError;
use crate::host::DocumentHost;
use crate::summarize::{DeclarationKind, Outcome, Summarizer};

/// A summarize command as exposed to an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SummarizeComponentTypeSets,
    SummarizeEntityQueries,
    SummarizeAll,
}

impl Command {
    /// The declaration kinds this command regenerates, in pass order.
    pub fn kinds(&self) -> &'static [DeclarationKind] {
        match self {
            Command::SummarizeComponentTypeSets => &[DeclarationKind::TypeSet],
            Command::SummarizeEntityQueries => &[DeclarationKind::Query],
            Command::SummarizeAll => &DeclarationKind::ALL,
        }
    }

    /// Choose the command covering `kinds`.
    pub fn for_kinds(kinds: &[DeclarationKind]) -> Self {
        let type_sets = kinds.contains(&DeclarationKind::TypeSet);
        let queries = kinds.contains(&DeclarationKind::Query);
        match (type_sets, queries) {
            (true, false) => Command::SummarizeComponentTypeSets,
            (false, true) => Command::SummarizeEntityQueries,
            _ => Command::SummarizeAll,
        }
    }

    /// Run the command against `host`.
    ///
    /// The buffer is only replaced when the whole pipeline succeeds and the
    /// text actually changed. A missing buffer is shown as an error and an
    /// empty scan as an info notice; both are also returned as `Err`.
    pub fn execute<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        summarizer: &Summarizer,
    ) -> Result<Outcome, SummarizeError> {
        let text = match host.current_text()? {
            Some(text) => text,
            None => {
                let err = SummarizeError::NoTargetBuffer;
                host.show_error(&err.to_string());
                return Err(err);
            }
        };

        let outcome = match summarizer.run_all(&text, self.kinds()) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.is_notice() {
                    host.show_info(&err.to_string());
                } else {
                    host.show_error(&err.to_string());
                }
                return Err(err);
            }
        };

        if outcome.changed {
            host.replace_all(&outcome.text)?;
        }

        Ok(outcome)
    }
}
