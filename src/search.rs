//! Search screen: query the backend and render composed results.
//!
//! Each search is a load on a [`ListScreen`] of [`RenderableResult`]s, so
//! overlapping searches follow the same last-response-wins rule as every
//! other list. The header only switches to a new query once that query's
//! results are the ones on screen.

use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::Mutex;

use risp_client_core::api::{RispApi, RpcError};
use risp_client_core::compose::{compose_all, RenderableResult};
use risp_client_core::list::{ListPhase, Page};
use risp_client_core::models::ApiResponse;

use crate::screen::ListScreen;

/// Shown in place of a preview when no highlight fragment resolved.
pub const NO_PREVIEW: &str = "(no preview)";

#[derive(Debug, Clone, Default, PartialEq)]
struct Shown {
    query: String,
    max_score: f64,
}

#[derive(Clone)]
pub struct SearchScreen {
    results: ListScreen<RenderableResult>,
    shown: Arc<Mutex<Shown>>,
}

impl SearchScreen {
    pub fn new(api: Arc<dyn RispApi>) -> Self {
        Self {
            results: ListScreen::new(api, None),
            shown: Arc::new(Mutex::new(Shown::default())),
        }
    }

    /// Runs `expression`. Returns whether its results are now displayed.
    pub async fn search(&self, expression: &str) -> bool {
        let expr = expression.to_string();
        let max_score = Arc::new(Mutex::new(0.0));
        let score_slot = Arc::clone(&max_score);

        self.results
            .reload_then(
                |api| async move {
                    let resp = api.query(&expr).await?.into_result()?;
                    *score_slot.lock() = resp.max_score;
                    Ok::<_, RpcError>(Page::new(compose_all(&resp.edges), resp.edges_total))
                },
                || {
                    let mut shown = self.shown.lock();
                    shown.query = expression.to_string();
                    shown.max_score = *max_score.lock();
                },
            )
            .await
    }

    pub fn query(&self) -> String {
        self.shown.lock().query.clone()
    }

    pub fn max_score(&self) -> f64 {
        self.shown.lock().max_score
    }

    pub fn phase(&self) -> ListPhase {
        self.results.phase()
    }

    pub fn last_error(&self) -> Option<RpcError> {
        self.results.last_error()
    }

    pub fn results(&self) -> Vec<RenderableResult> {
        self.results.with_list(|list| list.items().to_vec())
    }

    /// e.g. `2 results for "foo"`.
    pub fn summary(&self) -> String {
        let total = self.results.with_list(|list| list.total());
        let noun = if total == 1 { "result" } else { "results" };
        format!("{} {} for \"{}\"", total, noun, self.query())
    }

    /// Opens a result's display URI with the platform handler.
    pub async fn open(&self, result: &RenderableResult) -> Result<(), RpcError> {
        self.results.api().open_uri(result.uri()).await
    }
}

/// Renders one result as text lines: link, URL label, preview and, for
/// files with a known type, the icon URL.
pub fn format_result(result: &RenderableResult) -> Vec<String> {
    let mut lines = vec![
        format!("[{:.3}] {}", result.score(), result.link_text()),
        format!("    {}", result.url_label()),
        format!("    {}", result.preview().unwrap_or(NO_PREVIEW)),
    ];
    if let Some(icon) = result.icon() {
        match result.icon_alt() {
            Some(alt) => lines.push(format!("    icon: {} ({})", icon.url(), alt)),
            None => lines.push(format!("    icon: {}", icon.url())),
        }
    }
    lines
}

pub async fn run_search(api: Arc<dyn RispApi>, query: &str, open_first: bool) -> Result<()> {
    let screen = SearchScreen::new(api);
    screen.search(query).await;
    if let Some(err) = screen.last_error() {
        bail!("Search failed: {}", err);
    }

    let results = screen.results();
    println!("{}", screen.summary());
    for result in &results {
        println!();
        for line in format_result(result) {
            println!("{}", line);
        }
    }

    if open_first {
        match results.first() {
            Some(first) => screen.open(first).await?,
            None => eprintln!("No results to open"),
        }
    }
    Ok(())
}
