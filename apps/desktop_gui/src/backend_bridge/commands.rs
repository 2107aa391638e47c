//! Backend commands queued from UI to backend worker.

use shared::domain::SearchTerm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchDefinition { term: SearchTerm },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchDefinition { .. } => "fetch_definition",
        }
    }
}
