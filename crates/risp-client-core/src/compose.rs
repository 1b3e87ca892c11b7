//! Query hit → render-ready result.
//!
//! [`compose`] is total: any hit, including one with a malformed
//! `data_json` payload or no highlights, produces a [`RenderableResult`]
//! that can be rendered without further backend calls.
//!
//! # Display URIs
//!
//! The two resource kinds join their URI segments differently, and that is
//! kept as observed on the wire:
//!
//! - files: `escape(source_canonical_uri) + "/" + escape(canonical_uri)`,
//!   where whitespace is percent-escaped per segment;
//! - web pages: `source_canonical_uri + canonical_uri`, verbatim.

use serde::Serialize;

use crate::highlight::resolve;
use crate::icons::IconRef;
use crate::models::{Entity, QueryHit, Resource, ResourceType};

/// Best-effort structure of a file resource's `data_json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileData {
    pub path: Option<String>,
    pub filename: Option<String>,
    pub filetype: Option<String>,
}

impl FileData {
    /// Parses `data_json`, field by field. Anything missing, mistyped, or
    /// unparseable is `None`.
    pub fn parse(data_json: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(data_json) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        Self {
            path: field("path"),
            filename: field("filename"),
            filetype: field("filetype"),
        }
    }
}

/// A file hit ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FsFileResult {
    pub score: f64,
    pub urn: String,
    /// Link text.
    pub canonical_uri: String,
    /// Link target, see the module docs for the joining rule.
    pub uri: String,
    /// The URL line: `data.path` if present, otherwise [`uri`](Self::uri).
    pub url_label: String,
    pub title: Option<String>,
    pub preview: Option<String>,
    pub icon: Option<IconRef>,
    pub file: FileData,
}

/// A web page hit ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebPageResult {
    pub score: f64,
    pub urn: String,
    pub canonical_uri: String,
    pub uri: String,
    pub title: Option<String>,
    pub preview: Option<String>,
}

/// Render-ready result, tagged by resource kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RenderableResult {
    FsFile(FsFileResult),
    WebPage(WebPageResult),
}

impl RenderableResult {
    pub fn kind(&self) -> &'static str {
        match self {
            RenderableResult::FsFile(_) => "fs-file",
            RenderableResult::WebPage(_) => "web-page",
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            RenderableResult::FsFile(r) => r.score,
            RenderableResult::WebPage(r) => r.score,
        }
    }

    pub fn urn(&self) -> &str {
        match self {
            RenderableResult::FsFile(r) => &r.urn,
            RenderableResult::WebPage(r) => &r.urn,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            RenderableResult::FsFile(r) => &r.uri,
            RenderableResult::WebPage(r) => &r.uri,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            RenderableResult::FsFile(r) => r.title.as_deref(),
            RenderableResult::WebPage(r) => r.title.as_deref(),
        }
    }

    pub fn preview(&self) -> Option<&str> {
        match self {
            RenderableResult::FsFile(r) => r.preview.as_deref(),
            RenderableResult::WebPage(r) => r.preview.as_deref(),
        }
    }

    pub fn icon(&self) -> Option<&IconRef> {
        match self {
            RenderableResult::FsFile(r) => r.icon.as_ref(),
            RenderableResult::WebPage(_) => None,
        }
    }

    /// Alt text for the file-type icon.
    pub fn icon_alt(&self) -> Option<&str> {
        match self {
            RenderableResult::FsFile(r) => r.file.filename.as_deref(),
            RenderableResult::WebPage(_) => None,
        }
    }

    /// The line shown above the link.
    pub fn url_label(&self) -> &str {
        match self {
            RenderableResult::FsFile(r) => &r.url_label,
            RenderableResult::WebPage(r) => &r.uri,
        }
    }

    /// Link text: the resolved title, else the raw canonical URI.
    pub fn link_text(&self) -> &str {
        match self {
            RenderableResult::FsFile(r) => r.title.as_deref().unwrap_or(&r.canonical_uri),
            RenderableResult::WebPage(r) => r.title.as_deref().unwrap_or(&r.canonical_uri),
        }
    }
}

impl Entity for RenderableResult {
    const SINGULAR: &'static str = "result";
    const PLURAL: &'static str = "results";

    fn id(&self) -> &str {
        self.urn()
    }

    fn display_field(&self) -> &str {
        self.uri()
    }
}

/// Composes one hit. Unset resource type composes as a file.
pub fn compose(hit: &QueryHit) -> RenderableResult {
    match hit.resource.resource_type {
        ResourceType::WebPage => RenderableResult::WebPage(compose_web_page(hit)),
        ResourceType::FsFile | ResourceType::Unknown(_) => {
            RenderableResult::FsFile(compose_fs_file(hit))
        }
    }
}

/// Composes every hit, preserving backend order.
pub fn compose_all(hits: &[QueryHit]) -> Vec<RenderableResult> {
    hits.iter().map(compose).collect()
}

fn compose_fs_file(hit: &QueryHit) -> FsFileResult {
    let resource = &hit.resource;
    let resolved = resolve(ResourceType::FsFile, &hit.highlights);

    let mut file = FileData::parse(&resource.data_json);
    file.filetype = file.filetype.map(normalize_filetype);
    let icon = file.filetype.as_deref().and_then(IconRef::for_file_type);

    let uri = fs_file_uri(resource);
    let url_label = file
        .path
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| uri.clone());

    FsFileResult {
        score: hit.score,
        urn: resource.urn.clone(),
        canonical_uri: resource.canonical_uri.clone(),
        uri,
        url_label,
        title: resolved.title,
        preview: resolved.preview,
        icon,
        file,
    }
}

fn compose_web_page(hit: &QueryHit) -> WebPageResult {
    let resource = &hit.resource;
    let resolved = resolve(ResourceType::WebPage, &hit.highlights);

    WebPageResult {
        score: hit.score,
        urn: resource.urn.clone(),
        canonical_uri: resource.canonical_uri.clone(),
        uri: web_page_uri(resource),
        title: resolved.title,
        preview: resolved.preview,
    }
}

/// `png`, `jpg` and `jpeg` share the `photo` icon.
pub fn normalize_filetype(filetype: String) -> String {
    match filetype.as_str() {
        "png" | "jpg" | "jpeg" => "photo".to_string(),
        _ => filetype,
    }
}

/// Replaces each whitespace character with `%20`.
pub fn escape_whitespace(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_whitespace() {
            out.push_str("%20");
        } else {
            out.push(c);
        }
    }
    out
}

fn fs_file_uri(resource: &Resource) -> String {
    format!(
        "{}/{}",
        escape_whitespace(&resource.source_canonical_uri),
        escape_whitespace(&resource.canonical_uri)
    )
}

fn web_page_uri(resource: &Resource) -> String {
    format!("{}{}", resource.source_canonical_uri, resource.canonical_uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{FS_FILE_CONTENTS_TEXT, WEB_PAGE_BODY, WEB_PAGE_TITLE};
    use crate::models::HighlightFragment;

    fn file_hit(data_json: &str, highlights: Vec<HighlightFragment>) -> QueryHit {
        QueryHit {
            score: 1.5,
            resource: Resource {
                urn: "urn:r1".to_string(),
                source_canonical_uri: "/home/me/My Docs".to_string(),
                canonical_uri: "notes/a b.txt".to_string(),
                data_json: data_json.to_string(),
                ..Default::default()
            },
            highlights,
        }
    }

    fn web_hit(highlights: Vec<HighlightFragment>) -> QueryHit {
        QueryHit {
            score: 0.7,
            resource: Resource {
                urn: "urn:w1".to_string(),
                source_canonical_uri: "https://example.com".to_string(),
                canonical_uri: "/guide/intro".to_string(),
                resource_type: ResourceType::WebPage,
                ..Default::default()
            },
            highlights,
        }
    }

    #[test]
    fn fs_file_uri_escapes_each_segment() {
        let r = compose(&file_hit("{}", vec![]));
        assert_eq!(r.uri(), "/home/me/My%20Docs/notes/a%20b.txt");
        assert_eq!(r.kind(), "fs-file");
    }

    #[test]
    fn already_escaped_source_is_not_double_escaped() {
        let mut hit = file_hit("{}", vec![]);
        hit.resource.source_canonical_uri = "/a%20b".to_string();
        hit.resource.canonical_uri = "c d".to_string();
        assert_eq!(compose(&hit).uri(), "/a%20b/c%20d");
    }

    #[test]
    fn web_page_uri_joins_without_separator() {
        let r = compose(&web_hit(vec![]));
        assert_eq!(r.uri(), "https://example.com/guide/intro");
        assert_eq!(r.kind(), "web-page");
    }

    #[test]
    fn web_page_title_from_fragment() {
        let r = compose(&web_hit(vec![HighlightFragment::new(
            WEB_PAGE_TITLE,
            &["<b>Intro</b>", "other"],
        )]));
        assert_eq!(r.title(), Some("<b>Intro</b>"));
        assert_eq!(r.link_text(), "<b>Intro</b>");
    }

    #[test]
    fn web_page_without_title_links_with_canonical_uri() {
        let r = compose(&web_hit(vec![HighlightFragment::new(WEB_PAGE_BODY, &["body"])]));
        assert_eq!(r.title(), None);
        assert_eq!(r.link_text(), "/guide/intro");
        assert_eq!(r.uri(), "https://example.com/guide/intro");
        assert_eq!(r.preview(), Some("body"));
    }

    #[test]
    fn web_page_without_highlights_links_with_canonical_uri() {
        let r = compose(&web_hit(vec![]));
        assert_eq!(r.link_text(), "/guide/intro");
        assert_eq!(r.url_label(), "https://example.com/guide/intro");
    }

    #[test]
    fn no_highlights_means_no_preview() {
        assert_eq!(compose(&file_hit("{}", vec![])).preview(), None);
        assert_eq!(compose(&web_hit(vec![])).preview(), None);
    }

    #[test]
    fn jpg_uses_photo_icon() {
        let r = compose(&file_hit(r#"{"filetype":"jpg"}"#, vec![]));
        assert_eq!(r.icon(), IconRef::for_file_type("photo").as_ref());
    }

    #[test]
    fn unknown_filetype_has_no_icon() {
        let r = compose(&file_hit(r#"{"filetype":"exe"}"#, vec![]));
        assert_eq!(r.icon(), None);
    }

    #[test]
    fn malformed_data_json_degrades() {
        for payload in ["", "not json", "[1,2]", r#"{"filetype": 3, "path": null}"#] {
            let r = compose(&file_hit(payload, vec![]));
            match r {
                RenderableResult::FsFile(f) => {
                    assert_eq!(f.file.filetype, None);
                    assert_eq!(f.icon, None);
                    assert_eq!(f.url_label, f.uri);
                }
                other => panic!("expected fs-file, got {:?}", other),
            }
        }
    }

    #[test]
    fn path_is_the_url_label() {
        let hit = file_hit(
            r#"{"path":"/a/b.txt","filename":"b.txt","filetype":"txt"}"#,
            vec![HighlightFragment::new(FS_FILE_CONTENTS_TEXT, &["<b>foo</b> match"])],
        );
        let r = compose(&hit);
        assert_eq!(r.url_label(), "/a/b.txt");
        assert_eq!(r.preview(), Some("<b>foo</b> match"));
        assert_eq!(r.link_text(), "notes/a b.txt");
        assert_eq!(r.icon().map(|i| i.file_type.as_str()), Some("txt"));
    }

    #[test]
    fn unknown_resource_type_composes_as_file() {
        let mut hit = file_hit("{}", vec![]);
        hit.resource.resource_type = ResourceType::Unknown(12);
        assert_eq!(compose(&hit).kind(), "fs-file");
    }

    #[test]
    fn compose_all_keeps_order() {
        let hits = vec![web_hit(vec![]), file_hit("{}", vec![])];
        let kinds: Vec<&str> = compose_all(&hits).iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["web-page", "fs-file"]);
    }
}
