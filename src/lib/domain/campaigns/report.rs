//! Batch run report

use serde::Serialize;

/// Error recorded when recipients or the template could not be loaded
pub const LOAD_FAILURE: &str = "Failed to load recipients or template";

/// Error recorded when the SMTP session could not be opened
pub const CONNECT_FAILURE: &str = "Failed to connect to Gmail";

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Messages accepted by the server
    #[serde(rename = "success")]
    pub success_count: usize,

    /// Recipients whose message could not be built or sent
    #[serde(rename = "failed")]
    pub failed_count: usize,

    /// One entry per failure, in the order they happened
    pub errors: Vec<String>,
}

impl RunReport {
    /// A report for a run that stopped before any recipient was attempted
    pub fn aborted(reason: &str) -> Self {
        Self {
            errors: vec![reason.to_string()],
            ..Self::default()
        }
    }

    /// Count a delivered message
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Count a failed recipient
    pub fn record_failure(&mut self, error: String) {
        self.failed_count += 1;
        self.errors.push(error);
    }
}
