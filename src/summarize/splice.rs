//! Insertion of rendered summaries back into the document text.

use serde::{Deserialize, Serialize};

use super::SummaryBlock;

/// Line terminator used for inserted summary lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// CRLF if the document already contains one, LF otherwise
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    /// Resolve to the concrete terminator for `text`.
    pub fn resolve(&self, text: &str) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Auto => {
                if text.contains("\r\n") {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// Byte offset of the start of the line containing `offset`.
pub(crate) fn line_start(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Insert every block at the start of the line holding its target offset.
///
/// Blocks are applied from the highest offset to the lowest, so an insertion
/// never moves an offset that has not been applied yet.
pub fn splice(text: &str, blocks: &[SummaryBlock], newline: &str) -> String {
    let mut ordered: Vec<&SummaryBlock> = blocks.iter().collect();
    ordered.sort_by(|a, b| b.target_offset.cmp(&a.target_offset));

    let mut result = text.to_string();
    for block in ordered {
        let at = line_start(&result, block.target_offset);
        let mut chunk = String::new();
        for line in &block.lines {
            chunk.push_str(line);
            chunk.push_str(newline);
        }
        result.insert_str(at, &chunk);
    }

    result
}
