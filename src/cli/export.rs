//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::TokensrcConfig;
use crate::orchestrator::Orchestrator;
use crate::sink::MemorySink;

use super::{load_snapshot, write_output, EXIT_ERROR, EXIT_SUCCESS};

/// Run one pass and write the outbound message (data or error) as JSON.
pub async fn run_export(input: &Path, output: Option<&Path>, config: &TokensrcConfig) -> ExitCode {
    let event = match load_snapshot(input) {
        Ok(source) => {
            let sink = MemorySink::new();
            match Orchestrator::new(&source, &sink).run().await {
                Ok(event) => event,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        }
        Err(event) => event,
    };

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&event)
    } else {
        serde_json::to_string(&event)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = write_output(output, &json) {
        eprintln!("Error: failed to write output: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    if event.is_error() {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
