//! Sources screen: list with adapter icon, index a new URI.

use std::sync::Arc;

use anyhow::{bail, Result};

use risp_client_core::api::RispApi;
use risp_client_core::icons::adapter_glyph;
use risp_client_core::list::ListController;
use risp_client_core::modal::{IndexUriFields, ModalError};
use risp_client_core::models::Source;

use crate::config::Config;
use crate::screen::{ListScreen, Screens};

/// One rendered source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub selected: bool,
    /// Adapter icon name, or `-` for adapters the client does not know.
    pub icon: String,
    pub adapter: &'static str,
    pub canonical_uri: String,
    pub urn: String,
}

impl SourceRow {
    pub fn new(source: &Source, selected: bool) -> Self {
        Self {
            selected,
            icon: adapter_glyph(source.adapter_type)
                .map(|g| g.name())
                .unwrap_or_else(|| "-".to_string()),
            adapter: source.adapter_type.label(),
            canonical_uri: source.canonical_uri.clone(),
            urn: source.urn.clone(),
        }
    }
}

pub fn source_rows(list: &ListController<Source>) -> Vec<SourceRow> {
    list.items()
        .iter()
        .map(|s| SourceRow::new(s, list.selection().is_selected(&s.id)))
        .collect()
}

pub fn render_sources(list: &ListController<Source>) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<3} {:<16} {:<8} {:<48} URN",
        "", "ICON", "ADAPTER", "URI"
    )];
    for row in source_rows(list) {
        let mark = if row.selected { "[x]" } else { "[ ]" };
        lines.push(format!(
            "{:<3} {:<16} {:<8} {:<48} {}",
            mark, row.icon, row.adapter, row.canonical_uri, row.urn
        ));
    }
    lines
}

pub async fn run_sources(api: Arc<dyn RispApi>) -> Result<()> {
    let screen = ListScreen::<Source>::new(api, None);
    screen.reload().await;
    if let Some(err) = screen.last_error() {
        bail!("Failed to load sources: {}", err);
    }

    let (lines, total) = screen.with_list(|list| (render_sources(list), list.total()));
    for line in lines {
        println!("{}", line);
    }
    println!();
    println!("{} sources", total);
    Ok(())
}

pub async fn run_index(api: Arc<dyn RispApi>, config: &Config, uri: &str) -> Result<()> {
    let mut screens = Screens::new(api);
    let mut dialog = screens.index_uri_dialog(config.ui.close_modal_on_error);
    dialog.open(IndexUriFields {
        uri: uri.to_string(),
    });

    match dialog.submit().await {
        Ok(source) => println!("Indexed {} ({})", source.canonical_uri, source.urn),
        Err(ModalError::Validation(err)) => bail!("Invalid URI: {}", err),
        Err(err) => bail!("Failed to index {}: {}", uri, err),
    }

    screens.pump().await;
    screens.sources.with_list(|list| {
        for line in render_sources(list) {
            println!("{}", line);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use risp_client_core::models::AdapterType;

    fn source(id: &str, uri: &str, adapter: AdapterType) -> Source {
        Source {
            id: id.to_string(),
            canonical_uri: uri.to_string(),
            adapter_type: adapter,
            ..Default::default()
        }
    }

    #[test]
    fn row_icons_by_adapter() {
        let fs = SourceRow::new(&source("s1", "/docs", AdapterType::Fs), false);
        assert_eq!((fs.icon.as_str(), fs.adapter), ("HardDriveGroup", "FS"));

        let web = SourceRow::new(&source("s2", "https://x.dev", AdapterType::Web), true);
        assert_eq!((web.icon.as_str(), web.adapter), ("Globe2", "Web"));
        assert!(web.selected);

        let other = SourceRow::new(&source("s3", "?", AdapterType::Unknown(4)), false);
        assert_eq!((other.icon.as_str(), other.adapter), ("-", "-"));
    }
}
