//! Merge directive parsing.
//!
//! A merge directive lives in the raw comment of a container declaration:
//! - `@module <name>` - rename this declaration to `<name>`, or merge it into an
//!   existing declaration of the same kind called `<name>`
//! - `@preferred` - on a merging declaration, its comment replaces the target's

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::MergeError;
use crate::core::model::NodeId;

pub const DEFAULT_DIRECTIVE_TAG: &str = "module";
pub const DEFAULT_PREFERRED_TAG: &str = "preferred";

static MODULE_DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&directive_pattern(DEFAULT_DIRECTIVE_TAG)).unwrap());

static PREFERRED_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&marker_pattern(DEFAULT_PREFERRED_TAG)).unwrap());

fn directive_pattern(tag: &str) -> String {
    format!(r"@{}\s+([A-Za-z0-9_]+)", regex::escape(tag))
}

/// The marker stands alone: whitespace, the comment close or the end of the
/// text must follow it.
fn marker_pattern(tag: &str) -> String {
    format!(r"@{}(?:[\s*]|$)", regex::escape(tag))
}

/// A pending rename/merge request, recorded during collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDirective {
    pub target_name: String,
    pub preferred: bool,
    pub source: NodeId,
}

/// Result of scanning one raw comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDirective {
    pub target_name: String,
    pub preferred: bool,
}

/// Compiled directive and preferred-marker patterns.
#[derive(Debug, Clone)]
pub struct DirectiveSyntax {
    directive_tag: String,
    preferred_tag: String,
    directive: Regex,
    preferred: Regex,
}

impl Default for DirectiveSyntax {
    fn default() -> Self {
        Self {
            directive_tag: DEFAULT_DIRECTIVE_TAG.to_string(),
            preferred_tag: DEFAULT_PREFERRED_TAG.to_string(),
            directive: MODULE_DIRECTIVE_REGEX.clone(),
            preferred: PREFERRED_MARKER_REGEX.clone(),
        }
    }
}

impl DirectiveSyntax {
    /// Build a syntax for custom tag names (without the leading `@`).
    pub fn new(directive_tag: &str, preferred_tag: &str) -> Result<Self, MergeError> {
        let compile = |tag: &str, pattern: String| {
            Regex::new(&pattern).map_err(|source| MergeError::InvalidDirectiveSyntax {
                tag: tag.to_string(),
                source,
            })
        };

        Ok(Self {
            directive: compile(directive_tag, directive_pattern(directive_tag))?,
            preferred: compile(preferred_tag, marker_pattern(preferred_tag))?,
            directive_tag: directive_tag.to_string(),
            preferred_tag: preferred_tag.to_string(),
        })
    }

    pub fn directive_tag(&self) -> &str {
        &self.directive_tag
    }

    pub fn preferred_tag(&self) -> &str {
        &self.preferred_tag
    }

    /// Scan raw comment text for a merge directive.
    ///
    /// Only the first directive is honored. The preferred marker may appear
    /// anywhere in the text, before or after the directive.
    ///
    /// # Returns
    /// - `Some(ScannedDirective)` if the text contains `@module <identifier>`
    /// - `None` otherwise (including a bare `@module` with no identifier)
    pub fn scan(&self, text: &str) -> Option<ScannedDirective> {
        let target_name = self.directive.captures(text)?.get(1)?.as_str().to_string();
        Some(ScannedDirective {
            target_name,
            preferred: self.preferred.is_match(text),
        })
    }
}
