//! Decision audit sink configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Where decision audit records are published
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Sink kind
    #[serde(default)]
    pub sink: AuditSink,

    /// Target file for the `file` sink
    pub file_path: Option<String>,
}

/// Audit sink kind
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditSink {
    /// Structured log records
    #[default]
    Log,
    /// Append-only JSON-lines file
    File,
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sink == AuditSink::File
            && self.file_path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            return Err(ValidationError::MissingRequired("audit.file_path"));
        }
        Ok(())
    }
}
