use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: u32,
    #[serde(default)]
    pub name: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Aborted,
    Exception,
    Skipped,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Succeeded => "succeeded",
            StepStatus::Failed => "failed",
            StepStatus::Aborted => "aborted",
            StepStatus::Exception => "exception",
            StepStatus::Skipped => "skipped",
            StepStatus::Cancelled => "cancelled",
            StepStatus::Unknown => "unknown",
        }
    }

    /// A completed step never changes status again.
    pub fn is_completed(&self) -> bool {
        match self {
            StepStatus::Succeeded
            | StepStatus::Failed
            | StepStatus::Aborted
            | StepStatus::Exception
            | StepStatus::Skipped => true,
            StepStatus::Pending
            | StepStatus::Running
            | StepStatus::Cancelled
            | StepStatus::Unknown => false,
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_statuses() {
        let completed: Vec<_> = [
            StepStatus::Pending,
            StepStatus::Running,
            StepStatus::Succeeded,
            StepStatus::Failed,
            StepStatus::Aborted,
            StepStatus::Exception,
            StepStatus::Skipped,
            StepStatus::Cancelled,
            StepStatus::Unknown,
        ]
        .into_iter()
        .filter(StepStatus::is_completed)
        .collect();
        assert_eq!(
            completed,
            vec![
                StepStatus::Succeeded,
                StepStatus::Failed,
                StepStatus::Aborted,
                StepStatus::Exception,
                StepStatus::Skipped,
            ]
        );
    }

    #[test]
    fn step_from_service_json() {
        let step: Step =
            serde_json::from_str(r#"{"index":2,"name":"compile","status":"running","is_enabled":true}"#)
                .unwrap();
        assert_eq!(step.index, 2);
        assert_eq!(step.name, "compile");
        assert_eq!(step.status, StepStatus::Running);
    }

    #[test]
    fn unrecognized_status_is_unknown() {
        let step: Step = serde_json::from_str(r#"{"index":0,"status":"paused"}"#).unwrap();
        assert_eq!(step.status, StepStatus::Unknown);
        assert!(!step.status.is_completed());
    }

    #[test]
    fn display_matches_wire_name() {
        for status in [StepStatus::Exception, StepStatus::Pending, StepStatus::Skipped] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
