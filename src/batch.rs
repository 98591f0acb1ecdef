//! Batch configuration: several charts regenerated into their documents in one run.
//!
//! ```yaml
//! projects:
//!   - name: Platform
//!     input: plan/platform.csv
//!     output: docs/platform.md
//!     level: 2
//!     wbs: true
//!     pert: true
//!     kanban: true
//!     column: Sprint
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::kanban::STATUS_FIELD;

/// Default PERT inclusion level when a project leaves it unset.
pub const DEFAULT_LEVEL: usize = 3;

#[derive(Debug, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub projects: Vec<ProjectJob>,
}

/// One document and the artifacts embedded into it.
#[derive(Debug, Deserialize)]
pub struct ProjectJob {
    #[serde(default)]
    pub name: String,
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub wbs: bool,
    #[serde(default)]
    pub wbs_table: bool,
    #[serde(default)]
    pub pert: bool,
    #[serde(default)]
    pub kanban: bool,
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub filter: Option<String>,
}

impl ProjectJob {
    pub fn level(&self) -> usize {
        if self.level > 0 {
            self.level
        } else {
            DEFAULT_LEVEL
        }
    }

    pub fn column(&self) -> &str {
        self.column
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(STATUS_FIELD)
    }
}

impl BatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
