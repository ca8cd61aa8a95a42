//! Declaration documents: the JSON form of a declaration tree.
//!
//! Input documents carry raw comment text and are turned into a tree by
//! [`TreeBuilder`], which reports every created declaration to the
//! [`ModuleMerger`] as it goes. Resolved trees are written back out as
//! [`ResolvedDeclaration`]s with structured comments.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::MergeError;
use crate::core::merger::ModuleMerger;
use crate::core::model::{Comment, DeclarationKind, DeclarationTree, NodeId};

/// One declaration as produced by the upstream analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDocument {
    #[serde(default = "default_root_kind")]
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclarationDocument>,
}

fn default_root_kind() -> DeclarationKind {
    DeclarationKind::Project
}

impl DeclarationDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid declaration document")
    }
}

pub fn parse_document_file(path: &Path) -> Result<DeclarationDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration document: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse declaration document: {:?}", path))
}

/// Materializes a [`DeclarationDocument`] into a tree.
pub struct TreeBuilder;

impl TreeBuilder {
    /// Build the tree depth-first, in document order.
    ///
    /// Each declaration is handed to `merger.on_declaration` right after it is
    /// created, together with its raw comment. The caller is responsible for
    /// `begin_collection` before and `resolve_merges` after.
    pub fn build(
        document: &DeclarationDocument,
        merger: &mut ModuleMerger,
    ) -> Result<DeclarationTree> {
        let mut tree = DeclarationTree::new(document.kind, document.name.as_str());
        let root = tree.root();
        if let Some(raw) = document.comment.as_deref() {
            tree.replace_comment(root, Some(Comment::parse(raw)))?;
        }
        merger.on_declaration(&tree, root, document.comment.as_deref())?;

        let mut stack: Vec<(NodeId, &DeclarationDocument)> = document
            .children
            .iter()
            .rev()
            .map(|child| (root, child))
            .collect();

        while let Some((parent, doc)) = stack.pop() {
            let comment = doc.comment.as_deref().map(Comment::parse);
            let id = tree.add_child(parent, doc.kind, doc.name.as_str(), comment)?;
            merger.on_declaration(&tree, id, doc.comment.as_deref())?;
            stack.extend(doc.children.iter().rev().map(|child| (id, child)));
        }

        Ok(tree)
    }
}

/// One declaration of a resolved tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedDeclaration>,
}

impl ResolvedDeclaration {
    pub fn from_tree(tree: &DeclarationTree) -> Result<Self, MergeError> {
        Self::from_node(tree, tree.root())
    }

    fn from_node(tree: &DeclarationTree, id: NodeId) -> Result<Self, MergeError> {
        let node = tree.node(id)?;
        Ok(Self {
            kind: node.kind,
            name: node.name.clone(),
            comment: node.comment.clone(),
            children: node
                .children
                .iter()
                .map(|child| Self::from_node(tree, *child))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize resolved tree")?;
        json.push('\n');
        Ok(json)
    }
}
