//! Directive collector for the collection phase.
//!
//! The collector observes declarations as the tree builder creates them and
//! records a [`MergeDirective`] for every eligible declaration whose raw
//! comment carries `@module <name>`. The pending list lives for exactly one
//! build: [`DirectiveCollector::begin`] creates it, [`DirectiveCollector::drain`]
//! hands it to resolution.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::directive::{DirectiveSyntax, MergeDirective};
use crate::core::error::MergeError;
use crate::core::model::{DeclarationKind, DeclarationNode, NodeId};

#[derive(Debug, Clone)]
pub struct DirectiveCollector {
    syntax: DirectiveSyntax,
    mergeable_kind: DeclarationKind,
    pending: Option<PendingDirectives>,
}

#[derive(Debug, Clone, Default)]
struct PendingDirectives {
    directives: Vec<MergeDirective>,
    sources: HashSet<NodeId>,
}

impl DirectiveCollector {
    pub fn new(syntax: DirectiveSyntax, mergeable_kind: DeclarationKind) -> Self {
        Self {
            syntax,
            mergeable_kind,
            pending: None,
        }
    }

    pub fn syntax(&self) -> &DirectiveSyntax {
        &self.syntax
    }

    pub fn mergeable_kind(&self) -> DeclarationKind {
        self.mergeable_kind
    }

    /// Start a new build, discarding anything left from a previous one.
    pub fn begin(&mut self) {
        self.pending = Some(PendingDirectives::default());
    }

    /// Inspect one declaration and its raw comment.
    ///
    /// Returns `Ok(true)` if a directive was recorded. A declaration that was
    /// already recorded in this build is not recorded again.
    pub fn observe(
        &mut self,
        node: &DeclarationNode,
        raw_comment: Option<&str>,
    ) -> Result<bool, MergeError> {
        let pending = self
            .pending
            .as_mut()
            .ok_or(MergeError::CollectionNotStarted)?;

        let Some(raw_comment) = raw_comment else {
            return Ok(false);
        };
        if node.kind != self.mergeable_kind {
            trace!(
                target: "declmerge::collect",
                node = %node.id,
                kind = %node.kind,
                "skipping comment on non-mergeable declaration"
            );
            return Ok(false);
        }
        let Some(scanned) = self.syntax.scan(raw_comment) else {
            return Ok(false);
        };
        if !pending.sources.insert(node.id) {
            debug!(
                target: "declmerge::collect",
                node = %node.id,
                "declaration already has a directive in this build"
            );
            return Ok(false);
        }

        debug!(
            target: "declmerge::collect",
            node = %node.id,
            name = %node.name,
            target_name = %scanned.target_name,
            preferred = scanned.preferred,
            "recorded merge directive"
        );
        pending.directives.push(MergeDirective {
            target_name: scanned.target_name,
            preferred: scanned.preferred,
            source: node.id,
        });
        Ok(true)
    }

    /// Directives recorded so far, in collection order.
    pub fn pending(&self) -> Option<&[MergeDirective]> {
        self.pending.as_ref().map(|p| p.directives.as_slice())
    }

    /// Hand the recorded directives to resolution, ending the build.
    pub fn drain(&mut self) -> Result<Vec<MergeDirective>, MergeError> {
        self.pending
            .take()
            .map(|p| p.directives)
            .ok_or(MergeError::CollectionNotStarted)
    }
}

impl Default for DirectiveCollector {
    fn default() -> Self {
        Self::new(
            DirectiveSyntax::default(),
            DeclarationKind::default_mergeable(),
        )
    }
}
