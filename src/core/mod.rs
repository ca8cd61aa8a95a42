//! Core merge engine (two-phase pipeline).
//!
//! ## Pipeline
//!
//! 1. **Collection** (`collect`): while the tree builder creates declarations,
//!    `@module` directives are read from their raw comments and queued.
//! 2. **Resolution** (`resolve`): once the tree is complete, the queued
//!    directives are applied in order, renaming declarations or merging them
//!    into an existing declaration of the same kind.
//!
//! [`ModuleMerger`] is the entry point a host pipeline drives; [`MergeContext`]
//! runs that pipeline over every declaration document in a project.
//!
//! ## Module Structure
//!
//! - `collect`: Phase 1, directive parsing and the pending directive list
//! - `context`: Project configuration, document discovery, parallel builds
//! - `error`: Programmer errors raised by the core
//! - `merger`: Entry points for one build
//! - `model`: Declaration tree, kinds and structured comments
//! - `parsers`: Comment and declaration document parsing
//! - `resolve`: Phase 2, applying directives to the tree

pub mod collect;
pub mod context;
pub mod error;
pub mod merger;
pub mod model;
pub mod parsers;
pub mod resolve;

pub use context::{DocumentResolution, MergeContext, ParseErrorIssue, ResolveResults};
pub use error::MergeError;
pub use merger::ModuleMerger;
pub use resolve::{MergeOutcome, MergeReport};
