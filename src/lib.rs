//! declmerge - merge documented declarations using `@module` directives
//!
//! declmerge takes a declaration tree produced by a source analyzer and folds
//! declarations together according to `@module <name>` directives found in
//! their comments. A declaration whose target name is free is renamed; one
//! whose target already exists is merged into it, with `@preferred` deciding
//! which documentation survives.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Merge engine (two-phase pipeline)
//! - `logging`: Diagnostic logging setup

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
