use crate::core::prompt::{ESSENCE_MARKER, READING_MARKER};
use crate::domain::model::ReadingSection;
use regex::Regex;
use std::sync::LazyLock;

static MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "{}|{}",
        regex::escape(ESSENCE_MARKER),
        regex::escape(READING_MARKER)
    );
    Regex::new(&pattern).expect("marker pattern is a valid regex")
});

enum Fragment<'a> {
    Marker(&'a str),
    Text(&'a str),
}

/// Cut `text` at the marker titles, keeping the markers as their own fragments.
/// Empty and whitespace-only fragments are dropped.
fn fragments(text: &str) -> Vec<Fragment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in MARKERS.find_iter(text) {
        let before = &text[last..m.start()];
        if !before.trim().is_empty() {
            out.push(Fragment::Text(before));
        }
        out.push(Fragment::Marker(m.as_str()));
        last = m.end();
    }

    let tail = &text[last..];
    if !tail.trim().is_empty() {
        out.push(Fragment::Text(tail));
    }
    out
}

/// Split a reading into titled sections. This is a best-effort parse: when
/// the model drops or reorders a title the text degrades to untitled
/// paragraphs instead of failing.
pub fn split_sections(text: &str) -> Vec<ReadingSection> {
    let mut sections = Vec::new();
    let mut iter = fragments(text).into_iter().peekable();

    while let Some(fragment) = iter.next() {
        match fragment {
            Fragment::Marker(title) => {
                if let Some(Fragment::Text(content)) = iter.peek() {
                    sections.push(ReadingSection {
                        title: Some(title.to_string()),
                        content: content.trim().to_string(),
                    });
                    iter.next();
                } else {
                    sections.push(ReadingSection {
                        title: None,
                        content: title.to_string(),
                    });
                }
            }
            Fragment::Text(content) => sections.push(ReadingSection {
                title: None,
                content: content.trim().to_string(),
            }),
        }
    }

    sections
}
