//! Interactive line loop.
//!
//! | Input | Action |
//! |-------|--------|
//! | `query <expr>` | run a search and print the results |
//! | `menu` | toggle the navigation menu and print it when open |
//! | `exit` / `quit` | leave the loop |
//! | anything else | send as a raw backend command (`Execute`) |

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use risp_client_core::api::RispApi;
use risp_client_core::models::ApiResponse;
use risp_client_core::shell::ShellState;

use crate::config::Config;
use crate::search::{format_result, SearchScreen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Query(String),
    Menu,
    Exit,
    Execute(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        match line.split_once(char::is_whitespace) {
            Some(("query", expr)) => return ReplCommand::Query(expr.trim().to_string()),
            None if line == "query" => return ReplCommand::Query(String::new()),
            _ => {}
        }
        match line {
            "menu" => ReplCommand::Menu,
            "exit" | "quit" => ReplCommand::Exit,
            _ => ReplCommand::Execute(line.to_string()),
        }
    }
}

pub struct Repl {
    api: Arc<dyn RispApi>,
    search: SearchScreen,
    shell: ShellState,
}

impl Repl {
    pub fn new(api: Arc<dyn RispApi>, shell: ShellState) -> Self {
        Self {
            search: SearchScreen::new(Arc::clone(&api)),
            api,
            shell,
        }
    }

    /// Runs one command and returns the lines to print, or `None` to exit.
    /// Backend failures are reported as output, never as `Err`.
    pub async fn handle(&self, command: ReplCommand) -> Option<Vec<String>> {
        match command {
            ReplCommand::Empty => Some(Vec::new()),
            ReplCommand::Exit => None,
            ReplCommand::Menu => {
                if self.shell.toggle_menu() {
                    Some(
                        self.shell
                            .menu_items()
                            .iter()
                            .map(|item| format!("  {}", item.label()))
                            .collect(),
                    )
                } else {
                    Some(vec!["(menu hidden)".to_string()])
                }
            }
            ReplCommand::Query(expr) => {
                self.search.search(&expr).await;
                if let Some(err) = self.search.last_error() {
                    return Some(vec![format!("Error: {}", err)]);
                }
                let mut lines = vec![self.search.summary()];
                for result in self.search.results() {
                    lines.extend(format_result(&result));
                }
                Some(lines)
            }
            ReplCommand::Execute(command) => {
                let outcome = self
                    .api
                    .execute(&command)
                    .await
                    .and_then(|resp| resp.into_result());
                match outcome {
                    Ok(_) => Some(vec!["OK".to_string()]),
                    Err(err) => {
                        tracing::warn!(%command, error = %err, "execute failed");
                        Some(vec![format!("Error: {}", err)])
                    }
                }
            }
        }
    }
}

pub async fn run_repl(api: Arc<dyn RispApi>, config: &Config) -> Result<()> {
    let shell = ShellState::new();
    shell
        .menu_open()
        .subscribe(|open| tracing::debug!(open = *open, "menu toggled"));
    let repl = Repl::new(api, shell);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", config.repl.prompt);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match repl.handle(ReplCommand::parse(&line)).await {
            Some(output) => {
                for out in output {
                    println!("{}", out);
                }
            }
            None => break,
        }
    }
    Ok(())
}
