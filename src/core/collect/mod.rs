//! Phase 1: Collection - Merge directives from declaration comments.
//!
//! This module handles the first phase of the merge pipeline. As the tree
//! builder creates each declaration, its raw comment is scanned for
//! `@module <name>` (and an optional `@preferred`). Matches are recorded as
//! pending [`MergeDirective`]s which Phase 2 (Resolution) applies once the
//! whole tree exists.
//!
//! ## Module Structure
//!
//! - `collector`: Per-build pending directive list and the eligibility guard
//! - `directive`: Directive and preferred-marker parsing

pub mod collector;
pub mod directive;

pub use collector::DirectiveCollector;
pub use directive::{DirectiveSyntax, MergeDirective, ScannedDirective};
