//! Icon references for result rows and list columns.
//!
//! Icons are references, never fetched here: the renderer decides how to
//! show a [`Glyph`] (font icon name or file-type image URL).

use serde::Serialize;

use crate::models::{AdapterType, ResourceType};

/// Base URL for file-type icon images.
pub const FILE_TYPE_ICON_BASE: &str =
    "https://static2.sharepointonline.com/files/fabric/assets/item-types/16";

/// File types that have an icon image. Anything else gets no icon and the
/// renderer picks a generic fallback.
pub const KNOWN_FILE_TYPES: &[&str] = &[
    "accdb",
    "audio",
    "code",
    "csv",
    "docx",
    "dotx",
    "mpp",
    "mpt",
    "model",
    "one",
    "onetoc",
    "potx",
    "ppsx",
    "pdf",
    "photo",
    "pptx",
    "presentation",
    "pub",
    "rtf",
    "spreadsheet",
    "txt",
    "vector",
    "vsdx",
    "vssx",
    "vstx",
    "xlsx",
    "xltx",
    "xsn",
];

/// A file-type icon image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRef {
    pub file_type: String,
}

impl IconRef {
    /// Returns an icon only for allow-listed file types.
    pub fn for_file_type(file_type: &str) -> Option<Self> {
        KNOWN_FILE_TYPES.contains(&file_type).then(|| IconRef {
            file_type: file_type.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/{}.svg", FILE_TYPE_ICON_BASE, self.file_type)
    }
}

/// What a list column shows for a type discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Glyph {
    /// A named font icon.
    Font(&'static str),
    /// A file-type image.
    Image(IconRef),
}

impl Glyph {
    pub fn name(&self) -> String {
        match self {
            Glyph::Font(name) => name.to_string(),
            Glyph::Image(icon) => icon.file_type.clone(),
        }
    }
}

pub fn adapter_glyph(adapter: AdapterType) -> Option<Glyph> {
    match adapter {
        AdapterType::Fs => Some(Glyph::Font("HardDriveGroup")),
        AdapterType::Web => Some(Glyph::Font("Globe2")),
        AdapterType::Unknown(_) => None,
    }
}

pub fn resource_glyph(resource_type: ResourceType) -> Glyph {
    match resource_type {
        ResourceType::FsFile => Glyph::Font("Page"),
        ResourceType::WebPage => Glyph::Font("Globe"),
        ResourceType::Unknown(_) => Glyph::Image(IconRef {
            file_type: "model".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_type_has_icon_url() {
        let icon = IconRef::for_file_type("pdf").unwrap();
        assert_eq!(
            icon.url(),
            "https://static2.sharepointonline.com/files/fabric/assets/item-types/16/pdf.svg"
        );
    }

    #[test]
    fn unknown_type_has_no_icon() {
        assert!(IconRef::for_file_type("exe").is_none());
        assert!(IconRef::for_file_type("").is_none());
    }

    #[test]
    fn unset_types_map_to_first_variant_glyphs() {
        assert_eq!(
            adapter_glyph(AdapterType::default()),
            Some(Glyph::Font("HardDriveGroup"))
        );
        assert_eq!(resource_glyph(ResourceType::default()), Glyph::Font("Page"));
        assert_eq!(adapter_glyph(AdapterType::Unknown(5)), None);
    }
}
