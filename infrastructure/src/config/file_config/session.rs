//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use ttseval_domain::WorkflowVariant;

/// Raw session configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Workflow run by default (`single`, `paired`, `blind`, `calibration`)
    pub variant: WorkflowVariant,
}
