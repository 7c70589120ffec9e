//! WASM API module for browser/JS interop
//!
//! Lets a host plugin hand its variable snapshot to the compiled pipeline and
//! get the outbound message back as JSON.

use futures::executor::block_on;
use wasm_bindgen::prelude::*;

use crate::codegen::{render_typescript, CodegenOptions};
use crate::orchestrator::Orchestrator;
use crate::protocol::Event;
use crate::sink::MemorySink;
use crate::source::SnapshotSource;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Run one pass over the in-memory source. Its lookups never suspend.
fn export_event(snapshot_json: &str) -> Event {
    let source = match SnapshotSource::from_json(snapshot_json) {
        Ok(source) => source,
        Err(e) => return Event::error(e.to_string()),
    };
    let sink = MemorySink::new();
    block_on(Orchestrator::new(&source, &sink).run()).unwrap_or_else(|e| Event::error(e.to_string()))
}

/// Convert a snapshot (`{"variables": [...], "collections": [...]}`) into the
/// `variables-data` message, or an `error` message on failure.
#[wasm_bindgen(js_name = exportVariables)]
pub fn export_variables(snapshot_json: &str) -> String {
    let event = export_event(snapshot_json);
    serde_json::to_string(&event).unwrap_or_else(|e| {
        format!(r#"{{"type":"error","message":{}}}"#, serde_json::Value::String(e.to_string()))
    })
}

/// Convert a snapshot straight to TypeScript source.
#[wasm_bindgen(js_name = generateTypescript)]
pub fn generate_typescript(snapshot_json: &str) -> Result<String, JsValue> {
    let event = export_event(snapshot_json);
    render_typescript(&event, &CodegenOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
