//! Contexts screen: list, select, export, create.

use std::sync::Arc;

use anyhow::{bail, Result};

use risp_client_core::api::RispApi;
use risp_client_core::list::ListController;
use risp_client_core::modal::{CreateContextFields, ModalError};
use risp_client_core::models::{ApiResponse, Context};

use crate::config::Config;
use crate::screen::{ListScreen, Screens};

/// Renders the contexts table, one line per row plus a header.
pub fn render_contexts(list: &ListController<Context>) -> Vec<String> {
    let mut lines = vec![format!("{:<3} {:<24} {:<38} DEFAULT", "", "NAME", "ID")];
    for ctx in list.items() {
        let mark = if list.selection().is_selected(&ctx.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let default = if ctx.is_default { "*" } else { "" };
        lines.push(format!(
            "{:<3} {:<24} {:<38} {}",
            mark, ctx.name, ctx.id, default
        ));
    }
    lines
}

/// Exports the current selection to `output_path`. Returns the ids sent.
pub async fn export_selected(
    screen: &ListScreen<Context>,
    output_path: &str,
) -> Result<Vec<String>> {
    let ids = screen.selected_ids();
    if ids.is_empty() {
        bail!("No contexts selected; nothing to export");
    }
    screen
        .api()
        .export_contexts(&ids, output_path)
        .await?
        .into_result()?;
    Ok(ids)
}

pub async fn run_contexts(
    api: Arc<dyn RispApi>,
    config: &Config,
    select: &[String],
    export: bool,
    output: Option<&str>,
) -> Result<()> {
    let screen = ListScreen::<Context>::new(api, None);
    screen.reload().await;
    if let Some(err) = screen.last_error() {
        bail!("Failed to load contexts: {}", err);
    }

    for id in select {
        if !screen.toggle(id) {
            eprintln!("Warning: unknown context id '{}', skipped", id);
        }
    }

    let (lines, summary, label) = screen.with_list(|list| {
        (
            render_contexts(list),
            list.summary(),
            list.bulk_action_label("Export"),
        )
    });
    for line in lines {
        println!("{}", line);
    }
    println!();
    println!("{}", summary);

    if export {
        let path = output.unwrap_or(config.ui.export_filename.as_str());
        export_selected(&screen, path).await?;
        println!("{} to {}", label, path);
    }

    Ok(())
}

pub async fn run_create_context(api: Arc<dyn RispApi>, config: &Config, name: &str) -> Result<()> {
    let mut screens = Screens::new(api);
    let mut dialog = screens.create_context_dialog(config.ui.close_modal_on_error);
    dialog.open(CreateContextFields {
        name: name.to_string(),
    });

    match dialog.submit().await {
        Ok(ctx) => println!("Created context '{}' ({})", ctx.name, ctx.id),
        Err(ModalError::Validation(err)) => bail!("Invalid context: {}", err),
        Err(err) => bail!("Failed to create context: {}", err),
    }

    screens.pump().await;
    screens.contexts.with_list(|list| {
        for line in render_contexts(list) {
            println!("{}", line);
        }
    });
    Ok(())
}
