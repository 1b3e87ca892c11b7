//! Highlight fragment resolution.
//!
//! Picks the title and preview markup for a hit from its highlight set,
//! using a fixed per-type field priority:
//!
//! | Type | Title | Preview |
//! |------|-------|---------|
//! | `FsFile` (and unknown) | none | `fs-file.contents_text`, then `fs-file.contents_html` |
//! | `WebPage` | `web-page.title` | `web-page.body` |
//!
//! A field with no usable fragment resolves to `None`, never to an empty
//! string, so renderers can show a fixed placeholder.

use crate::models::{HighlightFragment, ResourceType};

pub const FS_FILE_CONTENTS_TEXT: &str = "fs-file.contents_text";
pub const FS_FILE_CONTENTS_HTML: &str = "fs-file.contents_html";
pub const WEB_PAGE_TITLE: &str = "web-page.title";
pub const WEB_PAGE_BODY: &str = "web-page.body";

const FS_FILE_PREVIEW_KEYS: &[&str] = &[FS_FILE_CONTENTS_TEXT, FS_FILE_CONTENTS_HTML];
const WEB_PAGE_TITLE_KEYS: &[&str] = &[WEB_PAGE_TITLE];
const WEB_PAGE_PREVIEW_KEYS: &[&str] = &[WEB_PAGE_BODY];

/// Resolved title and preview markup for one hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub title: Option<String>,
    pub preview: Option<String>,
}

/// Resolves title and preview for `resource_type` from `highlights`.
pub fn resolve(resource_type: ResourceType, highlights: &[HighlightFragment]) -> Resolved {
    match resource_type {
        ResourceType::WebPage => Resolved {
            title: first_by_priority(highlights, WEB_PAGE_TITLE_KEYS),
            preview: first_by_priority(highlights, WEB_PAGE_PREVIEW_KEYS),
        },
        ResourceType::FsFile | ResourceType::Unknown(_) => Resolved {
            title: None,
            preview: first_by_priority(highlights, FS_FILE_PREVIEW_KEYS),
        },
    }
}

/// First value of the highest-priority key that has one.
///
/// Keys are tried in priority order regardless of where they appear in
/// `highlights`; empty strings do not count as values.
fn first_by_priority(highlights: &[HighlightFragment], keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        highlights
            .iter()
            .filter(|h| h.key == *key)
            .flat_map(|h| h.values.iter())
            .find(|v| !v.is_empty())
            .cloned()
    })
}
