//! Serve command implementation
//!
//! Stands in for the host message channel: each stdin line is a request,
//! each stdout line an event.

use std::path::Path;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::orchestrator::Orchestrator;
use crate::protocol::Request;
use crate::sink::{EventSink, JsonLinesSink};

use super::{load_snapshot, EXIT_ERROR, EXIT_SUCCESS};

/// Serve requests until stdin closes.
pub async fn run_serve(input: &Path) -> ExitCode {
    let sink = JsonLinesSink::new(tokio::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: failed to read request: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "skipping malformed request");
                continue;
            }
        };
        debug!(?request, "request received");

        let delivered = match request {
            Request::GetVariables => match load_snapshot(input) {
                Ok(source) => Orchestrator::new(&source, &sink).handle(&request).await.map(|_| ()),
                Err(event) => sink.emit(&event).await,
            },
            Request::Unsupported => Ok(()),
        };

        if let Err(e) = delivered {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
