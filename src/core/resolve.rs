//! Phase 2: Resolution - Applying merge directives to the finished tree.
//!
//! Directives are applied one at a time, in collection order, each against the
//! live tree as left by the previous one:
//! - No declaration of the same kind outside the source's own subtree has the
//!   target name: the source is renamed in place.
//! - Otherwise the source's children move to the first such declaration in
//!   creation order. Its comment replaces the target's if `@preferred` was
//!   given, the source is removed, and the directive tags are stripped from
//!   the target's comment.

use tracing::{debug, warn};

use crate::core::collect::{DirectiveSyntax, MergeDirective};
use crate::core::error::MergeError;
use crate::core::model::{DeclarationTree, NodeId};

/// What applying one directive did to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Renamed {
        node: NodeId,
        from: String,
        to: String,
    },
    Merged {
        source: NodeId,
        source_name: String,
        target: NodeId,
        target_name: String,
        /// Former children of the source, now children of the target.
        relinked: Vec<NodeId>,
        comment_replaced: bool,
    },
    /// The source declaration was no longer in the tree.
    Skipped { source: NodeId, target_name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub outcomes: Vec<MergeOutcome>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn renamed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MergeOutcome::Renamed { .. }))
            .count()
    }

    pub fn merged_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MergeOutcome::Merged { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MergeOutcome::Skipped { .. }))
            .count()
    }
}

/// Apply every directive to `tree`, in order.
pub fn resolve_merges(
    tree: &mut DeclarationTree,
    directives: &[MergeDirective],
    syntax: &DirectiveSyntax,
) -> Result<MergeReport, MergeError> {
    let mut report = MergeReport::default();
    for directive in directives {
        report
            .outcomes
            .push(resolve_single_directive(tree, directive, syntax)?);
    }
    Ok(report)
}

fn resolve_single_directive(
    tree: &mut DeclarationTree,
    directive: &MergeDirective,
    syntax: &DirectiveSyntax,
) -> Result<MergeOutcome, MergeError> {
    let source = directive.source;
    let Some(source_node) = tree.get(source) else {
        warn!(
            target: "declmerge::resolve",
            node = %source,
            target_name = %directive.target_name,
            "merge source is no longer part of the tree"
        );
        return Ok(MergeOutcome::Skipped {
            source,
            target_name: directive.target_name.clone(),
        });
    };
    let source_kind = source_node.kind;
    let source_name = source_node.name.clone();

    // Fresh snapshot per directive: earlier merges are visible here.
    let snapshot = tree.snapshot();

    let Some(target) = tree.find_by_kind_and_name(source_kind, &directive.target_name, source)
    else {
        tree.rename(source, directive.target_name.as_str())?;
        debug!(
            target: "declmerge::resolve",
            node = %source,
            from = %source_name,
            to = %directive.target_name,
            "renamed declaration"
        );
        return Ok(MergeOutcome::Renamed {
            node: source,
            from: source_name,
            to: directive.target_name.clone(),
        });
    };

    let relinked: Vec<NodeId> = snapshot
        .into_iter()
        .filter(|id| tree.get(*id).is_some_and(|n| n.parent == Some(source)))
        .collect();
    for child in &relinked {
        tree.relink(*child, target)?;
    }

    if directive.preferred {
        let comment = tree.replace_comment(source, None)?;
        tree.replace_comment(target, comment)?;
    }

    // Removal cascades into children; nothing may be left to take with it.
    tree.clear_children(source)?;
    tree.remove(source)?;

    if let Some(comment) = tree.get_mut(target).and_then(|n| n.comment.as_mut()) {
        comment.remove_tags(syntax.directive_tag());
        comment.remove_tags(syntax.preferred_tag());
    }
    debug_assert!(tree.is_reachable(target));

    debug!(
        target: "declmerge::resolve",
        source = %source,
        target = %target,
        target_name = %directive.target_name,
        relinked = relinked.len(),
        preferred = directive.preferred,
        "merged declaration"
    );

    Ok(MergeOutcome::Merged {
        source,
        source_name,
        target,
        target_name: directive.target_name.clone(),
        relinked,
        comment_replaced: directive.preferred,
    })
}
