//! Collection orchestration
//!
//! One pass fetches every variable and collection, orders each collection's
//! members, projects every (variable, mode) pair, assembles one tree per
//! (collection, mode) and emits a single event.
//!
//! ```text
//! Idle -> Fetching -> Sorting -> Projecting -> Emitting -> Done
//!            \___________\____________\____________\-----> Failed
//! ```

use std::collections::HashMap;
use std::fmt;

use futures::future::try_join_all;
use tracing::{debug, error, info};

use crate::models::{DefinitionRecord, Mode, Variable, VariableCollection};
use crate::projector::project;
use crate::protocol::{CollectionTokens, Event, ModeDescriptor, ModeTokens, Request};
use crate::sink::{EventSink, SinkError};
use crate::source::{SourceError, VariableSource};
use crate::tree::build_tree;

/// Stage of an orchestration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Fetching,
    Sorting,
    Projecting,
    Emitting,
    Done,
    Failed,
}

impl fmt::Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassState::Idle => "idle",
            PassState::Fetching => "fetching",
            PassState::Sorting => "sorting",
            PassState::Projecting => "projecting",
            PassState::Emitting => "emitting",
            PassState::Done => "done",
            PassState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks and logs the state of one pass.
#[derive(Debug)]
struct Pass {
    state: PassState,
}

impl Pass {
    fn new() -> Self {
        Self { state: PassState::Idle }
    }

    fn advance(&mut self, next: PassState) {
        debug!(from = %self.state, to = %next, "pass state");
        self.state = next;
    }
}

/// Runs orchestration passes against a source, emitting into a sink.
pub struct Orchestrator<'a> {
    source: &'a dyn VariableSource,
    sink: &'a dyn EventSink,
}

impl<'a> Orchestrator<'a> {
    pub fn new(source: &'a dyn VariableSource, sink: &'a dyn EventSink) -> Self {
        Self { source, sink }
    }

    /// Handle one inbound request.
    ///
    /// Returns the emitted event, or `None` for requests that are ignored.
    pub async fn handle(&self, request: &Request) -> Result<Option<Event>, SinkError> {
        match request {
            Request::GetVariables => self.run().await.map(Some),
            Request::Unsupported => {
                debug!("ignoring unsupported request");
                Ok(None)
            }
        }
    }

    /// Run a full pass and emit exactly one event.
    ///
    /// A source failure becomes an error event; only a failure to deliver the
    /// event itself is returned as `Err`.
    pub async fn run(&self) -> Result<Event, SinkError> {
        let mut pass = Pass::new();

        let event = match self.collect(&mut pass).await {
            Ok(collections) => {
                pass.advance(PassState::Emitting);
                Event::VariablesData { collections }
            }
            Err(e) => {
                error!(error = %e, state = %pass.state, "variable export failed");
                pass.advance(PassState::Failed);
                Event::error(e.to_string())
            }
        };

        self.sink.emit(&event).await?;
        if pass.state == PassState::Emitting {
            pass.advance(PassState::Done);
        }
        Ok(event)
    }

    /// Run a pass without emitting, returning the token collections.
    pub async fn transform(&self) -> Result<Vec<CollectionTokens>, SourceError> {
        self.collect(&mut Pass::new()).await
    }

    async fn collect(&self, pass: &mut Pass) -> Result<Vec<CollectionTokens>, SourceError> {
        pass.advance(PassState::Fetching);
        let (variables, collections) =
            futures::try_join!(self.source.variables(), self.source.collections())?;

        pass.advance(PassState::Sorting);
        let grouped: Vec<(&VariableCollection, Vec<&Variable>)> = collections
            .iter()
            .map(|collection| (collection, order_members(collection, members_of(collection, &variables))))
            .collect();

        pass.advance(PassState::Projecting);
        let tokens = try_join_all(
            grouped.iter().map(|(collection, members)| self.collection_tokens(collection, members)),
        )
        .await?;

        info!(
            collections = tokens.len(),
            variables = variables.len(),
            "projected variable collections"
        );
        Ok(tokens)
    }

    async fn collection_tokens(
        &self,
        collection: &VariableCollection,
        members: &[&Variable],
    ) -> Result<CollectionTokens, SourceError> {
        let modes = collection
            .modes
            .iter()
            .map(|mode| ModeDescriptor {
                id: mode.mode_id.clone(),
                name: mode.name.clone(),
                is_default: collection.is_default(&mode.mode_id),
            })
            .collect();

        let variables_by_mode =
            try_join_all(collection.modes.iter().map(|mode| self.mode_tokens(collection, mode, members)))
                .await?;

        Ok(CollectionTokens {
            collection_id: collection.id.clone(),
            collection_name: collection.name.clone(),
            modes,
            variables_by_mode,
        })
    }

    async fn mode_tokens(
        &self,
        collection: &VariableCollection,
        mode: &Mode,
        members: &[&Variable],
    ) -> Result<ModeTokens, SourceError> {
        let records: Vec<DefinitionRecord> =
            try_join_all(members.iter().map(|variable| project(self.source, variable, &mode.mode_id)))
                .await?;

        debug!(
            collection = %collection.name,
            mode = %mode.name,
            records = records.len(),
            "building token tree"
        );

        Ok(ModeTokens {
            mode_id: mode.mode_id.clone(),
            mode_name: mode.name.clone(),
            data: build_tree(&collection.name, &records),
        })
    }
}

/// Variables owned by `collection`, in fetch order.
pub fn members_of<'v>(collection: &VariableCollection, variables: &'v [Variable]) -> Vec<&'v Variable> {
    variables.iter().filter(|v| v.variable_collection_id == collection.id).collect()
}

/// Reorder a collection's members by its declared ordering.
///
/// Without a (non-empty) declared ordering the members keep their order.
/// Otherwise the declared ids are mapped through the members, dropping ids
/// that match no member; members the ordering does not list are dropped too.
///
/// ```
/// use tokensrc::models::{ResolvedType, Variable, VariableCollection};
/// use tokensrc::orchestrator::order_members;
///
/// let v1 = Variable::new("v1", "a", "c", ResolvedType::Float);
/// let v2 = Variable::new("v2", "b", "c", ResolvedType::Float);
/// let collection = VariableCollection::new("c", "tokens").with_variable_ids(["v2", "v1"]);
///
/// let ordered = order_members(&collection, vec![&v1, &v2]);
/// assert_eq!(ordered.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), ["v2", "v1"]);
/// ```
pub fn order_members<'v>(collection: &VariableCollection, members: Vec<&'v Variable>) -> Vec<&'v Variable> {
    let Some(order) = collection.declared_order() else {
        return members;
    };

    let by_id: HashMap<&str, &'v Variable> = members.iter().map(|v| (v.id.as_str(), *v)).collect();
    order.iter().filter_map(|id| by_id.get(id.as_str()).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolvedType;

    fn var(id: &str) -> Variable {
        Variable::new(id, id, "c", ResolvedType::Float)
    }

    fn ids(vars: &[&Variable]) -> Vec<String> {
        vars.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_declared_order_wins_over_fetch_order() {
        let (v1, v2, v3) = (var("v1"), var("v2"), var("v3"));
        let collection = VariableCollection::new("c", "tokens").with_variable_ids(["v2", "v1", "v3"]);

        let ordered = order_members(&collection, vec![&v1, &v3, &v2]);
        assert_eq!(ids(&ordered), vec!["v2", "v1", "v3"]);
    }

    #[test]
    fn test_no_declared_order_keeps_fetch_order() {
        let (v1, v2, v3) = (var("v1"), var("v2"), var("v3"));
        let collection = VariableCollection::new("c", "tokens");

        let ordered = order_members(&collection, vec![&v3, &v1, &v2]);
        assert_eq!(ids(&ordered), vec!["v3", "v1", "v2"]);
    }

    #[test]
    fn test_unknown_and_unlisted_ids_are_dropped() {
        let (v1, v2) = (var("v1"), var("v2"));
        let collection = VariableCollection::new("c", "tokens").with_variable_ids(["ghost", "v2"]);

        let ordered = order_members(&collection, vec![&v1, &v2]);
        assert_eq!(ids(&ordered), vec!["v2"]);
    }

    #[test]
    fn test_members_of_filters_by_collection() {
        let variables = vec![
            Variable::new("a", "a", "c1", ResolvedType::Float),
            Variable::new("b", "b", "c2", ResolvedType::Float),
            Variable::new("c", "c", "c1", ResolvedType::Float),
        ];
        let collection = VariableCollection::new("c1", "tokens");
        assert_eq!(ids(&members_of(&collection, &variables)), vec!["a", "c"]);
    }

    #[test]
    fn test_pass_state_display() {
        assert_eq!(PassState::Projecting.to_string(), "projecting");
        assert_eq!(PassState::Failed.to_string(), "failed");
    }
}
