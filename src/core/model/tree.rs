//! Arena-backed declaration tree.
//!
//! Nodes live in a registry keyed by [`NodeId`]; `parent` and `children` are
//! ids into that registry. Ids are handed out in creation order and never
//! reused, so iterating the registry visits nodes in declaration order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Comment, DeclarationKind};
use crate::core::error::MergeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    pub id: NodeId,
    pub kind: DeclarationKind,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct DeclarationTree {
    root: NodeId,
    next_id: u32,
    nodes: BTreeMap<NodeId, DeclarationNode>,
}

impl DeclarationTree {
    /// Create a tree containing only a root node.
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            DeclarationNode {
                id: root,
                kind,
                name: name.into(),
                parent: None,
                children: Vec::new(),
                comment: None,
            },
        );
        Self {
            root,
            next_id: 1,
            nodes,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&DeclarationNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DeclarationNode> {
        self.nodes.get_mut(&id)
    }

    /// Like [`get`](Self::get), but a missing node is an error.
    pub fn node(&self, id: NodeId) -> Result<&DeclarationNode, MergeError> {
        self.nodes.get(&id).ok_or(MergeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DeclarationNode, MergeError> {
        self.nodes.get_mut(&id).ok_or(MergeError::UnknownNode(id))
    }

    /// All registered nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &DeclarationNode> {
        self.nodes.values()
    }

    /// Ids of every registered node, in ascending id order.
    pub fn snapshot(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Append a new node under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: DeclarationKind,
        name: impl Into<String>,
        comment: Option<Comment>,
    ) -> Result<NodeId, MergeError> {
        let id = NodeId(self.next_id);
        self.node_mut(parent)?.children.push(id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            DeclarationNode {
                id,
                kind,
                name: name.into(),
                parent: Some(parent),
                children: Vec::new(),
                comment,
            },
        );
        Ok(id)
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), MergeError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Replace the comment of `id`, returning the previous one.
    pub fn replace_comment(
        &mut self,
        id: NodeId,
        comment: Option<Comment>,
    ) -> Result<Option<Comment>, MergeError> {
        Ok(std::mem::replace(&mut self.node_mut(id)?.comment, comment))
    }

    /// Move `child` under `new_parent`, appending it to the end of its children.
    pub fn relink(&mut self, child: NodeId, new_parent: NodeId) -> Result<(), MergeError> {
        self.node(new_parent)?;
        let old_parent = self.node_mut(child)?.parent.replace(new_parent);
        if let Some(old) = old_parent.and_then(|id| self.nodes.get_mut(&id)) {
            old.children.retain(|c| *c != child);
        }
        self.node_mut(new_parent)?.children.push(child);
        Ok(())
    }

    /// Forget the children of `id` without touching the children themselves.
    pub fn clear_children(&mut self, id: NodeId) -> Result<Vec<NodeId>, MergeError> {
        Ok(std::mem::take(&mut self.node_mut(id)?.children))
    }

    /// Remove `id` and everything still listed in its children.
    ///
    /// The node is detached from its parent and dropped from the registry.
    /// Returns the removed nodes, `id` first.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<DeclarationNode>, MergeError> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().rev().copied());
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// First node in id order with the given kind and name, skipping `exclude`
    /// and everything below it.
    pub fn find_by_kind_and_name(
        &self,
        kind: DeclarationKind,
        name: &str,
        exclude: NodeId,
    ) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| {
                node.kind == kind && node.name == name && !self.is_within(node.id, exclude)
            })
            .map(|node| node.id)
    }

    /// Whether `id` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(next) = current {
            if next == ancestor {
                return true;
            }
            current = self.nodes.get(&next).and_then(|node| node.parent);
        }
        false
    }

    /// Whether `id` can be reached by walking children from the root.
    pub fn is_reachable(&self, id: NodeId) -> bool {
        let mut stack = vec![self.root];
        while let Some(next) = stack.pop() {
            if next == id {
                return true;
            }
            if let Some(node) = self.nodes.get(&next) {
                stack.extend(node.children.iter().copied());
            }
        }
        false
    }

    /// Indented `kind name` outline, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!("{} {}\n", node.kind, node.name));
            stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        out
    }
}
