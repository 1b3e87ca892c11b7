//! Resources screen.

use std::sync::Arc;

use anyhow::{bail, Result};

use risp_client_core::api::RispApi;
use risp_client_core::icons::resource_glyph;
use risp_client_core::list::ListController;
use risp_client_core::models::Resource;

use crate::screen::ListScreen;

pub fn render_resources(list: &ListController<Resource>) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<3} {:<8} {:<10} {:<48} SOURCE",
        "", "ICON", "TYPE", "URI"
    )];
    for res in list.items() {
        let mark = if list.selection().is_selected(&res.id) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(format!(
            "{:<3} {:<8} {:<10} {:<48} {}",
            mark,
            resource_glyph(res.resource_type).name(),
            res.resource_type.label(),
            res.canonical_uri,
            res.source_canonical_uri
        ));
    }
    lines
}

pub async fn run_resources(api: Arc<dyn RispApi>) -> Result<()> {
    let screen = ListScreen::<Resource>::new(api, None);
    screen.reload().await;
    if let Some(err) = screen.last_error() {
        bail!("Failed to load resources: {}", err);
    }

    let (lines, total) = screen.with_list(|list| (render_resources(list), list.total()));
    for line in lines {
        println!("{}", line);
    }
    println!();
    println!("{} resources", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use risp_client_core::api::memory::InMemoryApi;
    use risp_client_core::models::ResourceType;

    #[tokio::test]
    async fn rows_show_type_glyph() {
        let api = Arc::new(InMemoryApi::new().with_resources(vec![
            Resource {
                id: "r1".to_string(),
                canonical_uri: "notes.txt".to_string(),
                source_canonical_uri: "/docs".to_string(),
                ..Default::default()
            },
            Resource {
                id: "r2".to_string(),
                canonical_uri: "/about".to_string(),
                resource_type: ResourceType::WebPage,
                ..Default::default()
            },
        ]));
        let screen = ListScreen::<Resource>::new(api, None);
        screen.reload().await;

        let lines = screen.with_list(render_resources);
        assert!(lines[1].contains("Page"));
        assert!(lines[1].contains("File"));
        assert!(lines[1].trim_end().ends_with("/docs"));
        assert!(lines[2].contains("Globe"));
        assert!(lines[2].contains("Web page"));
    }
}
