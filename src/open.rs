//! Hands a URI to the platform's default handler.
//!
//! | Platform | Command |
//! |----------|---------|
//! | Linux / BSD | `xdg-open <uri>` |
//! | macOS | `open <uri>` |
//! | Windows | `cmd /C start "" <uri>` |

use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("refusing to open an empty URI")]
    EmptyUri,
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: &'static str,
        status: std::process::ExitStatus,
    },
}

/// Builds the opener invocation for the current platform.
pub fn opener_command(uri: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![uri.to_string()])
    } else if cfg!(target_os = "windows") {
        (
            "cmd",
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                uri.to_string(),
            ],
        )
    } else {
        ("xdg-open", vec![uri.to_string()])
    }
}

/// Opens `uri` and waits for the opener to exit.
pub async fn open_uri(uri: &str) -> Result<(), OpenError> {
    if uri.trim().is_empty() {
        return Err(OpenError::EmptyUri);
    }
    let (program, args) = opener_command(uri);
    tracing::debug!(program, uri, "opening uri");

    let status = tokio::process::Command::from({
        let mut cmd = Command::new(program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    })
    .status()
    .await
    .map_err(|source| OpenError::Spawn { program, source })?;

    if !status.success() {
        return Err(OpenError::Failed { program, status });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_is_passed_last() {
        let (_, args) = opener_command("file:///tmp/a b.txt");
        assert_eq!(args.last().map(String::as_str), Some("file:///tmp/a b.txt"));
    }

    #[tokio::test]
    async fn empty_uri_is_rejected() {
        assert!(matches!(open_uri("  ").await, Err(OpenError::EmptyUri)));
    }
}
