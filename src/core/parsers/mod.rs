//! Parsers for the pipeline's inputs.
//!
//! - `comment`: raw doc comment text into a structured [`Comment`](crate::core::model::Comment)
//! - `document`: JSON declaration documents into a declaration tree, and back out

pub mod comment;
pub mod document;
