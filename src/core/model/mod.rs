//! Declaration tree data model.
//!
//! - `kind`: declaration categories
//! - `comment`: structured documentation with tagged blocks
//! - `tree`: arena-backed tree and node registry

mod comment;
mod kind;
mod tree;

pub use comment::{Comment, CommentTag};
pub use kind::DeclarationKind;
pub use tree::{DeclarationNode, DeclarationTree, NodeId};
