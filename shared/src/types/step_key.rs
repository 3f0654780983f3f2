use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one step of one run. Every remote call is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepKey {
    pub project: String,
    pub run: String,
    pub step_index: u32,
}

impl StepKey {
    pub fn new(project: impl Into<String>, run: impl Into<String>, step_index: u32) -> Self {
        Self {
            project: project.into(),
            run: run.into(),
            step_index,
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.project, self.run, self.step_index)
    }
}
