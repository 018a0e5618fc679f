use serde::Serialize;

use crate::models::Task;

/// Emitted after a mutation has committed, carrying the resulting state.
/// Delivery semantics belong to whoever implements [`Notifier`]; the core
/// only guarantees one call per successful mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskEvent {
    Created { task: Task },
    Updated { task: Task },
    Deleted { id: String, owner_id: String },
}

pub trait Notifier {
    fn notify(&self, event: &TaskEvent);
}

/// Default wiring when no collaborator cares about mutations.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &TaskEvent) {}
}
