//! Structured documentation attached to a declaration.
//!
//! A comment is split into a short summary, the remaining body text and a list
//! of tagged blocks (`@module Foo`, `@param name text`, `@preferred`, ...).
//! Parsing from raw comment text lives in `core::parsers::comment`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// First paragraph of the description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_text: String,
    /// Everything after the first paragraph, up to the first tag.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<CommentTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTag {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl CommentTag {
    pub fn new(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            param_name: None,
            text: text.into(),
        }
    }
}

impl Comment {
    /// Remove every tag named `tag_name`, returning how many were removed.
    ///
    /// Calling this again with the same name is a no-op.
    pub fn remove_tags(&mut self, tag_name: &str) -> usize {
        let before = self.tags.len();
        self.tags.retain(|tag| tag.tag_name != tag_name);
        before - self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn has_tag(comment: &Comment, tag_name: &str) -> bool {
        comment.tags.iter().any(|tag| tag.tag_name == tag_name)
    }

    fn sample() -> Comment {
        Comment {
            short_text: "Shared helpers.".to_string(),
            text: "Used by every page.".to_string(),
            tags: vec![
                CommentTag::new("module", "Foo"),
                CommentTag::new("preferred", ""),
                CommentTag {
                    tag_name: "param".to_string(),
                    param_name: Some("id".to_string()),
                    text: "The id.".to_string(),
                },
                CommentTag::new("module", "Bar"),
            ],
        }
    }

    #[test]
    fn test_remove_tags_removes_all_matching() {
        let mut comment = sample();
        assert_eq!(comment.remove_tags("module"), 2);
        assert!(!has_tag(&comment, "module"));
        assert!(has_tag(&comment, "preferred"));
        assert_eq!(comment.tags.len(), 2);
    }

    #[test]
    fn test_remove_tags_missing_is_noop() {
        let mut comment = sample();
        let before = comment.clone();
        assert_eq!(comment.remove_tags("since"), 0);
        assert_eq!(comment, before);
    }

    #[test]
    fn test_serialize_skips_empty_parts() {
        let comment = Comment {
            short_text: "Hello".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&comment).unwrap();
        assert_eq!(json, r#"{"shortText":"Hello"}"#);
    }

    fn arb_tag() -> impl Strategy<Value = CommentTag> {
        (
            prop::sample::select(vec!["module", "preferred", "param", "see", "since"]),
            "[a-z ]{0,12}",
        )
            .prop_map(|(name, text)| CommentTag::new(name, text))
    }

    proptest! {
        #[test]
        fn prop_remove_tags_is_idempotent(tags in prop::collection::vec(arb_tag(), 0..12)) {
            let mut once = Comment { tags, ..Default::default() };
            once.remove_tags("module");
            once.remove_tags("preferred");

            let mut twice = once.clone();
            twice.remove_tags("module");
            twice.remove_tags("preferred");

            prop_assert_eq!(&once, &twice);
            prop_assert!(!has_tag(&once, "module"));
            prop_assert!(!has_tag(&once, "preferred"));
        }

        #[test]
        fn prop_remove_tags_keeps_other_tags_in_order(tags in prop::collection::vec(arb_tag(), 0..12)) {
            let expected: Vec<CommentTag> = tags
                .iter()
                .filter(|tag| tag.tag_name != "module")
                .cloned()
                .collect();
            let mut comment = Comment { tags, ..Default::default() };
            comment.remove_tags("module");
            prop_assert_eq!(comment.tags, expected);
        }
    }
}
