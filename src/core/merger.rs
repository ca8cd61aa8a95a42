//! Entry points for the host pipeline.
//!
//! A build drives one [`ModuleMerger`] through exactly this sequence:
//!
//! ```ignore
//! let mut merger = ModuleMerger::new(syntax, DeclarationKind::ExternalModule);
//! merger.begin_collection();
//! // for every declaration the tree builder creates:
//! merger.on_declaration(&tree, id, raw_comment)?;
//! // once the tree is complete:
//! let report = merger.resolve_merges(&mut tree)?;
//! ```

use tracing::{debug, trace};

use crate::core::collect::{DirectiveCollector, DirectiveSyntax};
use crate::core::error::MergeError;
use crate::core::model::{DeclarationKind, DeclarationTree, NodeId};
use crate::core::resolve::{MergeReport, resolve_merges};

#[derive(Debug, Clone, Default)]
pub struct ModuleMerger {
    collector: DirectiveCollector,
}

impl ModuleMerger {
    pub fn new(syntax: DirectiveSyntax, mergeable_kind: DeclarationKind) -> Self {
        Self {
            collector: DirectiveCollector::new(syntax, mergeable_kind),
        }
    }

    /// Start of a build: forget any directives from a previous build.
    pub fn begin_collection(&mut self) {
        self.collector.begin();
    }

    /// Called for every declaration right after the tree builder creates it.
    pub fn on_declaration(
        &mut self,
        tree: &DeclarationTree,
        id: NodeId,
        raw_comment: Option<&str>,
    ) -> Result<(), MergeError> {
        let node = tree.node(id)?;
        self.collector.observe(node, raw_comment)?;
        Ok(())
    }

    /// Number of directives waiting for resolution.
    pub fn pending_count(&self) -> usize {
        self.collector.pending().map_or(0, |p| p.len())
    }

    /// Start of the resolve phase: apply every collected directive.
    pub fn resolve_merges(&mut self, tree: &mut DeclarationTree) -> Result<MergeReport, MergeError> {
        let directives = self.collector.drain()?;
        debug!(
            target: "declmerge::resolve",
            directives = directives.len(),
            nodes = tree.len(),
            "resolving merge directives"
        );
        let report = resolve_merges(tree, &directives, self.collector.syntax())?;
        trace!(target: "declmerge::resolve", outline = %tree.outline(), "resolved tree");
        Ok(report)
    }
}
