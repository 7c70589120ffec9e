//! Integration tests for full orchestration passes
//!
//! Drives the orchestrator against in-memory and failing data sources and
//! checks the single emitted event:
//! - Tree shape and value projection per (collection, mode)
//! - Member ordering
//! - Alias placeholders
//! - Failure reporting

use async_trait::async_trait;
use serde_json::{json, Value};
use tokensrc::color::Rgba;
use tokensrc::models::{
    ResolvedType, Snapshot, Variable, VariableAlias, VariableCollection,
};
use tokensrc::orchestrator::Orchestrator;
use tokensrc::protocol::{Event, Request, UNKNOWN_ERROR_MESSAGE};
use tokensrc::sink::MemorySink;
use tokensrc::source::{SnapshotSource, SourceError, VariableSource};

const FIXTURE: &str = include_str!("fixtures/design_tokens.json");

async fn run(source: &dyn VariableSource) -> (Event, Vec<Event>) {
    let sink = MemorySink::new();
    let event = Orchestrator::new(source, &sink).run().await.expect("memory sink never fails");
    (event, sink.take())
}

fn data_of(event: &Event) -> Value {
    serde_json::to_value(event).unwrap()
}

// ========== Nesting and placeholders ==========

#[tokio::test]
async fn test_variable_nests_under_collection() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![Variable::new("v1", "color/brand/primary", "c1", ResolvedType::Color)
            .with_value("m1", Rgba::new(1.0, 0.0, 0.0, 1.0))],
        vec![VariableCollection::new("c1", "tokens").with_mode("m1", "Default")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    assert_eq!(
        json["collections"][0]["variablesByMode"][0]["data"],
        json!({"tokens": {"color": {"brand": {"primary": "#ff0000ff"}}}})
    );
}

#[tokio::test]
async fn test_alias_becomes_placeholder() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![
            Variable::new("base", "spacing/base", "core", ResolvedType::Float).with_value("c-m", 4.0),
            Variable::new("gap", "gap", "theme", ResolvedType::Float)
                .with_value("t-m", VariableAlias::new("base")),
        ],
        vec![
            VariableCollection::new("core", "_core").with_mode("c-m", "Value"),
            VariableCollection::new("theme", "theme").with_mode("t-m", "Light"),
        ],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    assert_eq!(json["collections"][0]["variablesByMode"][0]["data"], json!({"core": {"spacing": {"base": 4}}}));
    assert_eq!(
        json["collections"][1]["variablesByMode"][0]["data"]["theme"]["gap"],
        "##core['spacing']['base']##"
    );
}

#[tokio::test]
async fn test_declared_order_is_preserved() {
    let vars = ["v1", "v2", "v3"]
        .iter()
        .map(|id| Variable::new(*id, *id, "c1", ResolvedType::String).with_value("m1", *id))
        .collect();
    let source = SnapshotSource::new(Snapshot::new(
        vars,
        vec![VariableCollection::new("c1", "tokens").with_mode("m1", "Default").with_variable_ids(["v2", "v1", "v3"])],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    let keys: Vec<_> = json["collections"][0]["variablesByMode"][0]["data"]["tokens"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["v2", "v1", "v3"]);
}

#[tokio::test]
async fn test_fetch_order_without_declared_order() {
    let vars = ["v3", "v1", "v2"]
        .iter()
        .map(|id| Variable::new(*id, *id, "c1", ResolvedType::Boolean).with_value("m1", true))
        .collect();
    let source = SnapshotSource::new(Snapshot::new(
        vars,
        vec![VariableCollection::new("c1", "tokens").with_mode("m1", "Default")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    let keys: Vec<_> = json["collections"][0]["variablesByMode"][0]["data"]["tokens"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["v3", "v1", "v2"]);
}

// ========== Fixture snapshot ==========

#[tokio::test]
async fn test_fixture_snapshot() {
    let source = SnapshotSource::from_json(FIXTURE).unwrap();
    let (event, emitted) = run(&source).await;
    assert_eq!(emitted, vec![event.clone()]);

    let json = data_of(&event);
    assert_eq!(json["type"], "variables-data");

    let core = &json["collections"][0];
    assert_eq!(core["collectionName"], "_core");
    assert_eq!(core["modes"], json!([{"id": "1:0", "name": "Value", "isDefault": true}]));
    assert_eq!(
        core["variablesByMode"][0]["data"],
        json!({"core": {"color": {"brand": {"primary": "#ff0000ff"}}, "spacing": {"base": 4}}})
    );

    let theme = &json["collections"][1];
    assert_eq!(
        theme["modes"],
        json!([
            {"id": "2:0", "name": "Light", "isDefault": true},
            {"id": "2:1", "name": "Dark", "isDefault": false}
        ])
    );
    assert_eq!(
        theme["variablesByMode"][0],
        json!({
            "modeId": "2:0",
            "modeName": "Light",
            "data": {"theme": {
                "surface": {"background": "#ffffffff"},
                "layout": {"gap": "##core['spacing']['base']##"},
                "type": {"fontFamily": "Inter"},
                "motion": {"reduced": false}
            }}
        })
    );
    assert_eq!(theme["variablesByMode"][1]["data"]["theme"]["surface"]["background"], "#00000080");
    assert_eq!(theme["variablesByMode"][1]["data"]["theme"]["layout"]["gap"], 8);
}

#[tokio::test]
async fn test_variables_without_mode_value_keep_their_key() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![
            Variable::new("v1", "only-light", "c1", ResolvedType::Float).with_value("light", 1.0),
            Variable::new("v2", "both", "c1", ResolvedType::Float).with_value("light", 2.0).with_value("dark", 3.0),
        ],
        vec![VariableCollection::new("c1", "tokens").with_mode("light", "Light").with_mode("dark", "Dark")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    // NaN has no JSON form
    assert_eq!(
        json["collections"][0]["variablesByMode"][1]["data"],
        json!({"tokens": {"onlyLight": null, "both": 3}})
    );
}

#[tokio::test]
async fn test_missing_values_follow_declared_type() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![
            Variable::new("v1", "label", "c1", ResolvedType::String),
            Variable::new("v2", "enabled", "c1", ResolvedType::Boolean),
            Variable::new("v3", "tint", "c1", ResolvedType::Color),
        ],
        vec![VariableCollection::new("c1", "tokens").with_mode("m1", "Default")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    assert_eq!(
        json["collections"][0]["variablesByMode"][0]["data"],
        json!({"tokens": {"label": "undefined", "enabled": false, "tint": ""}})
    );
}

#[tokio::test]
async fn test_slashed_collection_name_nests_root() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![Variable::new("v1", "primary", "c1", ResolvedType::String).with_value("m1", "#fff")],
        vec![VariableCollection::new("c1", "Brand/Colors").with_mode("m1", "Default")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    assert_eq!(
        json["collections"][0]["variablesByMode"][0]["data"],
        json!({"brand": {"Colors": {"primary": "#fff"}}})
    );
}

#[tokio::test]
async fn test_empty_snapshot() {
    let (event, emitted) = run(&SnapshotSource::default()).await;
    assert_eq!(event, Event::VariablesData { collections: vec![] });
    assert_eq!(emitted.len(), 1);
}

#[tokio::test]
async fn test_transform_does_not_emit() {
    let source = SnapshotSource::from_json(FIXTURE).unwrap();
    let sink = MemorySink::new();
    let collections = Orchestrator::new(&source, &sink).transform().await.unwrap();
    assert_eq!(collections.len(), 2);
    assert!(sink.events().is_empty());
}

// ========== Requests ==========

#[tokio::test]
async fn test_handle_dispatches_requests() {
    let source = SnapshotSource::from_json(FIXTURE).unwrap();
    let sink = MemorySink::new();
    let orchestrator = Orchestrator::new(&source, &sink);

    assert!(orchestrator.handle(&Request::Unsupported).await.unwrap().is_none());
    assert!(sink.events().is_empty());

    let event = orchestrator.handle(&Request::GetVariables).await.unwrap();
    assert!(matches!(event, Some(Event::VariablesData { .. })));
    assert_eq!(sink.events().len(), 1);
}

// ========== Failures ==========

/// Source whose calls fail at a chosen point
struct FailingSource {
    inner: SnapshotSource,
    fail_fetch: bool,
    fail_lookup: bool,
    message: &'static str,
}

impl FailingSource {
    fn error(&self) -> SourceError {
        SourceError::Unavailable(self.message.to_string())
    }
}

#[async_trait]
impl VariableSource for FailingSource {
    async fn variables(&self) -> Result<Vec<Variable>, SourceError> {
        if self.fail_fetch {
            return Err(self.error());
        }
        self.inner.variables().await
    }

    async fn collections(&self) -> Result<Vec<VariableCollection>, SourceError> {
        self.inner.collections().await
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, SourceError> {
        if self.fail_lookup {
            return Err(self.error());
        }
        self.inner.variable_by_id(id).await
    }

    async fn collection_by_id(&self, id: &str) -> Result<Option<VariableCollection>, SourceError> {
        self.inner.collection_by_id(id).await
    }
}

#[tokio::test]
async fn test_fetch_failure_emits_single_error() {
    let source = FailingSource {
        inner: SnapshotSource::from_json(FIXTURE).unwrap(),
        fail_fetch: true,
        fail_lookup: false,
        message: "variables unavailable",
    };

    let (event, emitted) = run(&source).await;
    assert_eq!(event, Event::Error { message: "variables unavailable".into() });
    assert_eq!(emitted.iter().filter(|e| e.is_error()).count(), 1);
    assert_eq!(emitted.iter().filter(|e| !e.is_error()).count(), 0);
}

#[tokio::test]
async fn test_alias_lookup_failure_aborts_pass() {
    let source = FailingSource {
        inner: SnapshotSource::from_json(FIXTURE).unwrap(),
        fail_fetch: false,
        fail_lookup: true,
        message: "lookup exploded",
    };

    let (event, emitted) = run(&source).await;
    assert_eq!(event, Event::Error { message: "lookup exploded".into() });
    assert_eq!(emitted.len(), 1);
}

#[tokio::test]
async fn test_blank_error_message_uses_generic_fallback() {
    let source = FailingSource {
        inner: SnapshotSource::default(),
        fail_fetch: true,
        fail_lookup: false,
        message: "",
    };

    let (event, _) = run(&source).await;
    assert_eq!(event, Event::Error { message: UNKNOWN_ERROR_MESSAGE.into() });
}

#[tokio::test]
async fn test_missing_alias_target_degrades() {
    let source = SnapshotSource::new(Snapshot::new(
        vec![Variable::new("v1", "gap", "c1", ResolvedType::Float).with_value("m1", VariableAlias::new("gone"))],
        vec![VariableCollection::new("c1", "tokens").with_mode("m1", "Default")],
    ));

    let (event, _) = run(&source).await;
    let json = data_of(&event);
    assert_eq!(json["collections"][0]["variablesByMode"][0]["data"]["tokens"]["gap"], "####");
}
