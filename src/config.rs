//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// How the hierarchy validator treats a tag reachable through two proposed edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiamondPolicy {
    /// Any double path is a conflict, including diamond-shaped ancestries
    #[default]
    Reject,
    /// Only cycles through the validated tag and self edges are conflicts
    Allow,
}

impl std::fmt::Display for DiamondPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DiamondPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiamondPolicy::Reject => "reject",
            DiamondPolicy::Allow => "allow",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub diamond_policy: DiamondPolicy,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidInput(format!("invalid engine config: {}", e)))
    }

    pub fn load(path: &Path) -> DomainResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Internal(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn rejects_diamonds(&self) -> bool {
        self.diamond_policy == DiamondPolicy::Reject
    }
}
