//! Errors raised by the merge core.
//!
//! Every data-driven outcome (no directive, no merge target, ...) is a normal
//! branch. These variants only describe misuse by the calling pipeline.

use thiserror::Error;

use crate::core::model::NodeId;

#[derive(Debug, Error)]
pub enum MergeError {
    /// `on_declaration` or `resolve_merges` was called before `begin_collection`.
    #[error("directive collection has not been started for this build")]
    CollectionNotStarted,

    #[error("declaration {0} is not part of the tree")]
    UnknownNode(NodeId),

    #[error("invalid directive tag '{tag}'")]
    InvalidDirectiveSyntax {
        tag: String,
        #[source]
        source: regex::Error,
    },
}
