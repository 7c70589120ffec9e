//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codegen::{render_typescript, CodegenOptions};
use crate::config::TokensrcConfig;
use crate::orchestrator::Orchestrator;
use crate::sink::MemorySink;

use super::{load_snapshot, write_output, EXIT_ERROR, EXIT_SUCCESS};

/// Run one pass and write TypeScript constants for every collection mode.
pub async fn run_generate(input: &Path, output: Option<&Path>, config: &TokensrcConfig) -> ExitCode {
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

    let source = match render_typescript(&event, &CodegenOptions::from(&config.codegen)) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = write_output(output, &source) {
        eprintln!("Error: failed to write output: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}
