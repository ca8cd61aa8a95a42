use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::{Comment, CommentTag};

// A tag opens a line: `@name` optionally followed by text.
static TAG_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+(.*))?$").unwrap());

/// Tags whose first word names a parameter.
const PARAM_TAGS: &[&str] = &["param", "typeparam"];

struct PendingTag<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
}

impl Comment {
    /// Parse raw comment text into a structured comment.
    ///
    /// Accepts `/** ... */` blocks (with or without `*` gutters) as well as
    /// bare text. The description before the first tag is split at its first
    /// blank line into `short_text` and `text`.
    pub fn parse(raw: &str) -> Self {
        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<PendingTag<'_>> = Vec::new();

        for line in strip_comment_markers(raw) {
            if let Some(caps) = TAG_LINE_REGEX.captures(line) {
                let name = caps.get(1).map_or("", |m| m.as_str());
                let rest = caps.get(2).map_or("", |m| m.as_str());
                tags.push(PendingTag {
                    name,
                    lines: vec![rest],
                });
            } else if let Some(tag) = tags.last_mut() {
                tag.lines.push(line);
            } else {
                description.push(line);
            }
        }

        let (short_text, text) = split_description(&description);
        Self {
            short_text,
            text,
            tags: tags.into_iter().map(finish_tag).collect(),
        }
    }
}

fn strip_comment_markers(raw: &str) -> Vec<&str> {
    let body = raw.trim();
    let body = body
        .strip_prefix("/**")
        .or_else(|| body.strip_prefix("/*"))
        .unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    body.lines()
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix('*') {
                Some(rest) if !rest.starts_with('*') => rest.trim(),
                _ => line,
            }
        })
        .collect()
}

fn split_description(lines: &[&str]) -> (String, String) {
    let lines = trim_blank_lines(lines);
    match lines.iter().position(|line| line.is_empty()) {
        Some(blank) => (
            lines[..blank].join("\n"),
            trim_blank_lines(&lines[blank..]).join("\n"),
        ),
        None => (lines.join("\n"), String::new()),
    }
}

fn trim_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

fn finish_tag(tag: PendingTag<'_>) -> CommentTag {
    let text = trim_blank_lines(&tag.lines).join("\n");
    if PARAM_TAGS.contains(&tag.name) {
        let mut parts = text.splitn(2, char::is_whitespace);
        let param_name = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let rest = parts.next().unwrap_or("").trim().to_string();
        return CommentTag {
            tag_name: tag.name.to_string(),
            param_name,
            text: rest,
        };
    }
    CommentTag::new(tag.name, text)
}
