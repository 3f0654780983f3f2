use crate::types::log_chunk::LogCursor;
use crate::types::step::StepStatus;
use crate::types::step_key::StepKey;
use serde::{Deserialize, Serialize};

/// Initial state embedded by the server-rendered step page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepViewData {
    pub project_identifier: String,
    pub run_identifier: String,
    pub step_index: u32,
    #[serde(default)]
    pub step_status: Option<StepStatus>,
    #[serde(default)]
    pub log_cursor: Option<LogCursor>,
    #[serde(default)]
    pub service_url: Option<String>,
}

impl StepViewData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn step_key(&self) -> StepKey {
        StepKey::new(
            self.project_identifier.clone(),
            self.run_identifier.clone(),
            self.step_index,
        )
    }
}
